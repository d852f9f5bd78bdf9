// SPDX-License-Identifier: AGPL-3.0-or-later

//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::{Classification, StoredCategory, StoredMovie, StoredUser};

// ========== Users ==========

/// Registration request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Login handle, an email-shaped string
    pub username: String,
    /// Human-readable display name
    pub display_name: String,
    /// Plaintext password, validated against the password policy
    pub password: String,
    /// Role to assign at registration
    pub role: String,
}

/// Login request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token
    pub token: String,
    pub user: UserResponse,
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub roles: Vec<String>,
}

impl From<StoredUser> for UserResponse {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            roles: user.roles,
        }
    }
}

// ========== Categories ==========

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<StoredCategory> for CategoryResponse {
    fn from(category: StoredCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
        }
    }
}

// ========== Movies ==========

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMovieRequest {
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub classification: Classification,
    pub category_id: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateMovieRequest {
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub classification: Classification,
    pub category_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub poster_path: Option<String>,
    pub classification: Classification,
    pub category_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<StoredMovie> for MovieResponse {
    fn from(movie: StoredMovie) -> Self {
        Self {
            id: movie.id,
            name: movie.name,
            description: movie.description,
            duration_minutes: movie.duration_minutes,
            poster_path: movie.poster_path,
            classification: movie.classification,
            category_id: movie.category_id,
            created_at: movie.created_at,
        }
    }
}

// ========== Pagination ==========

const DEFAULT_PAGE_SIZE: u64 = 10;

/// Pagination query parameters, as received from the client.
///
/// Out-of-range values are clamped rather than rejected: a page below 1
/// becomes 1, a size below 1 becomes the default of 10.
#[derive(Debug, Clone, Copy, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    #[serde(default)]
    pub page_number: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl PageParams {
    /// Resolve to effective (page_number, page_size).
    pub fn resolve(&self) -> (u64, u64) {
        let page = match self.page_number {
            Some(p) if p >= 1 => p as u64,
            _ => 1,
        };
        let size = match self.page_size {
            Some(s) if s >= 1 => s as u64,
            _ => DEFAULT_PAGE_SIZE,
        };
        (page, size)
    }
}

/// A page of results with pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_items: u64,
    /// Total page count, rounded up. Zero when there are no items.
    pub total_pages: u64,
}

impl<T> PagedResponse<T> {
    pub fn new(items: Vec<T>, page_number: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(page_size);
        Self {
            items,
            page_number,
            page_size,
            total_items,
            total_pages,
        }
    }
}
