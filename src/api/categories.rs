// SPDX-License-Identifier: AGPL-3.0-or-later

//! Category endpoints. Reads are public, writes are Admin only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::AdminOnly;
use crate::error::ApiError;
use crate::models::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::state::AppState;
use crate::storage::{CategoryRepository, MovieRepository, StorageError, StoredCategory};

fn storage_error(context: &str, e: StorageError) -> ApiError {
    tracing::error!(error = %e, "{context}");
    ApiError::internal(context.to_string())
}

fn validate_name(name: &str) -> Result<&str, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Category name cannot be empty."));
    }
    Ok(name)
}

/// List all categories.
#[utoipa::path(
    get,
    path = "/v1/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories, oldest first", body = [CategoryResponse]),
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = CategoryRepository::new(&state.storage)
        .list_all()
        .map_err(|e| storage_error("Failed to list categories", e))?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Get a category by id.
#[utoipa::path(
    get,
    path = "/v1/categories/{category_id}",
    tag = "Categories",
    params(("category_id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = CategoryResponse),
        (status = 404, description = "No such category"),
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    match CategoryRepository::new(&state.storage).get(&category_id) {
        Ok(category) => Ok(Json(category.into())),
        Err(StorageError::NotFound(_)) => {
            Err(ApiError::not_found(format!("Category {category_id}")))
        }
        Err(e) => Err(storage_error("Failed to load category", e)),
    }
}

/// Create a category. Admin only.
#[utoipa::path(
    post,
    path = "/v1/categories",
    tag = "Categories",
    security(("bearer" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Empty or duplicate name"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an Admin"),
    )
)]
pub async fn create_category(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let name = validate_name(&request.name)?;
    let repo = CategoryRepository::new(&state.storage);

    // Advisory check: not atomic with the write, so two concurrent
    // creates of the same name can both pass. Category names are free
    // text and cannot key an index file the way usernames do.
    if repo
        .name_taken(name)
        .map_err(|e| storage_error("Failed to check category name", e))?
    {
        return Err(ApiError::bad_request(format!(
            "Category '{name}' already exists."
        )));
    }

    let category = StoredCategory {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        created_at: Utc::now(),
    };
    repo.create(&category)
        .map_err(|e| storage_error("Failed to create category", e))?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// Rename a category. Admin only.
#[utoipa::path(
    put,
    path = "/v1/categories/{category_id}",
    tag = "Categories",
    security(("bearer" = [])),
    params(("category_id" = String, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Empty or duplicate name"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an Admin"),
        (status = 404, description = "No such category"),
    )
)]
pub async fn update_category(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let name = validate_name(&request.name)?;
    let repo = CategoryRepository::new(&state.storage);

    let mut category = match repo.get(&category_id) {
        Ok(category) => category,
        Err(StorageError::NotFound(_)) => {
            return Err(ApiError::not_found(format!("Category {category_id}")))
        }
        Err(e) => return Err(storage_error("Failed to load category", e)),
    };

    // Renaming to the same name (any casing) is allowed.
    if !category.name.eq_ignore_ascii_case(name)
        && repo
            .name_taken(name)
            .map_err(|e| storage_error("Failed to check category name", e))?
    {
        return Err(ApiError::bad_request(format!(
            "Category '{name}' already exists."
        )));
    }

    category.name = name.to_string();
    repo.update(&category)
        .map_err(|e| storage_error("Failed to update category", e))?;

    Ok(Json(category.into()))
}

/// Delete a category. Admin only. Fails while movies still reference it.
#[utoipa::path(
    delete,
    path = "/v1/categories/{category_id}",
    tag = "Categories",
    security(("bearer" = [])),
    params(("category_id" = String, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Category still has movies"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an Admin"),
        (status = 404, description = "No such category"),
    )
)]
pub async fn delete_category(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let repo = CategoryRepository::new(&state.storage);

    if !repo.exists(&category_id) {
        return Err(ApiError::not_found(format!("Category {category_id}")));
    }

    let movies = MovieRepository::new(&state.storage)
        .list_by_category(&category_id)
        .map_err(|e| storage_error("Failed to check category movies", e))?;
    if !movies.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Category {category_id} still has {} movie(s).",
            movies.len()
        )));
    }

    match repo.delete(&category_id) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StorageError::NotFound(_)) => {
            Err(ApiError::not_found(format!("Category {category_id}")))
        }
        Err(e) => Err(storage_error("Failed to delete category", e)),
    }
}
