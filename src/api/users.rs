// SPDX-License-Identifier: AGPL-3.0-or-later

//! Account endpoints: registration, login and admin user listing.

use axum::{extract::Path, extract::State, Json};

use crate::auth::{self, AdminOnly, RegisterError};
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::state::AppState;
use crate::storage::{StorageError, UserRepository};

const BAD_CREDENTIALS: &str = "Invalid username or password.";

/// Register a new account.
#[utoipa::path(
    post,
    path = "/v1/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation failed, one message per violated rule"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    match auth::register(&state.storage, &request) {
        Ok(user) => Ok(Json(user)),
        Err(RegisterError::Rejected(violations)) => Err(ApiError::validation(violations)),
        Err(RegisterError::Storage(e)) => {
            tracing::error!(error = %e, "registration failed");
            Err(ApiError::internal("Failed to register user"))
        }
    }
}

/// Log in with username and password.
///
/// Unknown usernames and wrong passwords produce the same response.
#[utoipa::path(
    post,
    path = "/v1/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 400, description = "Bad credentials"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match auth::login(&state.storage, &state.auth, &request) {
        Ok(Some(response)) => Ok(Json(response)),
        Ok(None) => Err(ApiError::bad_request(BAD_CREDENTIALS)),
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            Err(ApiError::internal("Failed to log in"))
        }
    }
}

/// List every account. Admin only.
#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All accounts, ordered by username", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an Admin"),
    )
)]
pub async fn list_users(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserRepository::new(&state.storage)
        .list_all()
        .map_err(|e| {
            tracing::error!(error = %e, "failed to list users");
            ApiError::internal("Failed to list users")
        })?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a single account by id. Admin only.
#[utoipa::path(
    get,
    path = "/v1/users/{user_id}",
    tag = "Users",
    security(("bearer" = [])),
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The account", body = UserResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an Admin"),
        (status = 404, description = "No such user"),
    )
)]
pub async fn get_user(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    match UserRepository::new(&state.storage).get(&user_id) {
        Ok(user) => Ok(Json(user.into())),
        Err(StorageError::NotFound(_)) => Err(ApiError::not_found(format!("User {user_id}"))),
        Err(e) => {
            tracing::error!(error = %e, user_id, "failed to load user");
            Err(ApiError::internal("Failed to load user"))
        }
    }
}
