// SPDX-License-Identifier: AGPL-3.0-or-later

//! Movie endpoints. Reads (paged list, detail, search, by-category) are
//! public, writes are Admin only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AdminOnly;
use crate::error::ApiError;
use crate::models::{
    CreateMovieRequest, MovieResponse, PagedResponse, PageParams, UpdateMovieRequest,
};
use crate::state::AppState;
use crate::storage::{CategoryRepository, MovieRepository, StorageError, StoredMovie};

fn storage_error(context: &str, e: StorageError) -> ApiError {
    tracing::error!(error = %e, "{context}");
    ApiError::internal(context.to_string())
}

fn require_category(state: &AppState, category_id: &str) -> Result<(), ApiError> {
    if CategoryRepository::new(&state.storage).exists(category_id) {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "Category {category_id} does not exist."
        )))
    }
}

fn validate_movie_fields(name: &str, duration_minutes: u32) -> Result<(), ApiError> {
    let mut problems = Vec::new();
    if name.trim().is_empty() {
        problems.push("Movie name cannot be empty.".to_string());
    }
    if duration_minutes == 0 {
        problems.push("Movie duration must be at least one minute.".to_string());
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(problems))
    }
}

/// List movies, paged.
#[utoipa::path(
    get,
    path = "/v1/movies",
    tag = "Movies",
    params(PageParams),
    responses(
        (status = 200, description = "One page of movies, oldest first", body = PagedResponse<MovieResponse>),
    )
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedResponse<MovieResponse>>, ApiError> {
    let (page_number, page_size) = params.resolve();

    let (movies, total) = MovieRepository::new(&state.storage)
        .list_page(page_number as usize, page_size as usize)
        .map_err(|e| storage_error("Failed to list movies", e))?;

    Ok(Json(PagedResponse::new(
        movies.into_iter().map(MovieResponse::from).collect(),
        page_number,
        page_size,
        total as u64,
    )))
}

/// Get a movie by id.
#[utoipa::path(
    get,
    path = "/v1/movies/{movie_id}",
    tag = "Movies",
    params(("movie_id" = String, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie", body = MovieResponse),
        (status = 404, description = "No such movie"),
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<MovieResponse>, ApiError> {
    match MovieRepository::new(&state.storage).get(&movie_id) {
        Ok(movie) => Ok(Json(movie.into())),
        Err(StorageError::NotFound(_)) => Err(ApiError::not_found(format!("Movie {movie_id}"))),
        Err(e) => Err(storage_error("Failed to load movie", e)),
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring matched case-insensitively against name and description
    pub name: String,
}

/// Search movies by name or description.
#[utoipa::path(
    get,
    path = "/v1/movies/search",
    tag = "Movies",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching movies", body = [MovieResponse]),
    )
)]
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<MovieResponse>>, ApiError> {
    let movies = MovieRepository::new(&state.storage)
        .search(&params.name)
        .map_err(|e| storage_error("Failed to search movies", e))?;

    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

/// List the movies in one category.
#[utoipa::path(
    get,
    path = "/v1/movies/category/{category_id}",
    tag = "Movies",
    params(("category_id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Movies in the category", body = [MovieResponse]),
        (status = 404, description = "No such category"),
    )
)]
pub async fn movies_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<MovieResponse>>, ApiError> {
    if !CategoryRepository::new(&state.storage).exists(&category_id) {
        return Err(ApiError::not_found(format!("Category {category_id}")));
    }

    let movies = MovieRepository::new(&state.storage)
        .list_by_category(&category_id)
        .map_err(|e| storage_error("Failed to list category movies", e))?;

    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

/// Create a movie. Admin only.
#[utoipa::path(
    post,
    path = "/v1/movies",
    tag = "Movies",
    security(("bearer" = [])),
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie created", body = MovieResponse),
        (status = 400, description = "Invalid fields or unknown category"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an Admin"),
    )
)]
pub async fn create_movie(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateMovieRequest>,
) -> Result<(StatusCode, Json<MovieResponse>), ApiError> {
    validate_movie_fields(&request.name, request.duration_minutes)?;
    require_category(&state, &request.category_id)?;

    let movie = StoredMovie {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        description: request.description,
        duration_minutes: request.duration_minutes,
        poster_path: request.poster_path,
        classification: request.classification,
        category_id: request.category_id,
        created_at: Utc::now(),
    };

    MovieRepository::new(&state.storage)
        .create(&movie)
        .map_err(|e| storage_error("Failed to create movie", e))?;

    Ok((StatusCode::CREATED, Json(movie.into())))
}

/// Replace a movie. Admin only.
#[utoipa::path(
    put,
    path = "/v1/movies/{movie_id}",
    tag = "Movies",
    security(("bearer" = [])),
    params(("movie_id" = String, Path, description = "Movie id")),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = MovieResponse),
        (status = 400, description = "Invalid fields or unknown category"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an Admin"),
        (status = 404, description = "No such movie"),
    )
)]
pub async fn update_movie(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    Json(request): Json<UpdateMovieRequest>,
) -> Result<Json<MovieResponse>, ApiError> {
    validate_movie_fields(&request.name, request.duration_minutes)?;
    require_category(&state, &request.category_id)?;

    let repo = MovieRepository::new(&state.storage);
    let existing = match repo.get(&movie_id) {
        Ok(movie) => movie,
        Err(StorageError::NotFound(_)) => {
            return Err(ApiError::not_found(format!("Movie {movie_id}")))
        }
        Err(e) => return Err(storage_error("Failed to load movie", e)),
    };

    let movie = StoredMovie {
        id: existing.id,
        name: request.name.trim().to_string(),
        description: request.description,
        duration_minutes: request.duration_minutes,
        poster_path: request.poster_path,
        classification: request.classification,
        category_id: request.category_id,
        created_at: existing.created_at,
    };

    repo.update(&movie)
        .map_err(|e| storage_error("Failed to update movie", e))?;

    Ok(Json(movie.into()))
}

/// Delete a movie. Admin only.
#[utoipa::path(
    delete,
    path = "/v1/movies/{movie_id}",
    tag = "Movies",
    security(("bearer" = [])),
    params(("movie_id" = String, Path, description = "Movie id")),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an Admin"),
        (status = 404, description = "No such movie"),
    )
)]
pub async fn delete_movie(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match MovieRepository::new(&state.storage).delete(&movie_id) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StorageError::NotFound(_)) => Err(ApiError::not_found(format!("Movie {movie_id}"))),
        Err(e) => Err(storage_error("Failed to delete movie", e)),
    }
}
