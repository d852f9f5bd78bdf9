// SPDX-License-Identifier: AGPL-3.0-or-later

//! HTTP surface: router assembly and OpenAPI document.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::AuthenticatedUser,
    models::{
        CategoryResponse, CreateCategoryRequest, CreateMovieRequest, LoginRequest, LoginResponse,
        MovieResponse, PagedResponse, RegisterRequest, UpdateCategoryRequest, UpdateMovieRequest,
        UserResponse,
    },
    state::AppState,
    storage::Classification,
};

pub mod categories;
pub mod health;
pub mod movies;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users", get(users::list_users))
        .route("/users/{user_id}", get(users::get_user))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{category_id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/movies", get(movies::list_movies).post(movies::create_movie))
        .route("/movies/search", get(movies::search_movies))
        .route(
            "/movies/category/{category_id}",
            get(movies::movies_by_category),
        )
        .route(
            "/movies/{movie_id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        );

    Router::new()
        .nest("/v1", v1_routes)
        .route("/health", get(health::readiness))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        users::list_users,
        users::get_user,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        movies::list_movies,
        movies::get_movie,
        movies::search_movies,
        movies::movies_by_category,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        health::readiness,
        health::liveness
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UserResponse,
            AuthenticatedUser,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CategoryResponse,
            CreateMovieRequest,
            UpdateMovieRequest,
            MovieResponse,
            PagedResponse<MovieResponse>,
            Classification,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    tags(
        (name = "Users", description = "Registration, login and account administration"),
        (name = "Categories", description = "Movie category management"),
        (name = "Movies", description = "Movie catalog"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    use crate::auth::AuthContext;
    use crate::storage::{FileStorage, StoragePaths};

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let dir = env::temp_dir().join(format!("test-router-{}", uuid::Uuid::new_v4()));
        let state = AppState::new(
            FileStorage::new(StoragePaths::new(dir)),
            AuthContext::new("router-test-secret"),
        );
        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[test]
    fn openapi_document_renders() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("OpenAPI document should serialize");
        assert!(json.contains("/v1/users/register"));
        assert!(json.contains("/v1/movies/search"));
    }
}
