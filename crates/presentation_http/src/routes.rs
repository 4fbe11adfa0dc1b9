//! Route definitions

use axum::{
    Router,
    routing::get,
};

use crate::{handlers, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root redirect to the interactive docs
        .route("/", get(handlers::docs::root_redirect))
        // Health check
        .route("/health", get(handlers::health::health_check))
        // User registration API
        .route(
            "/users/",
            get(handlers::users::list_users).post(handlers::users::register_user),
        )
        .route("/users/{id}", get(handlers::users::get_user))
        // Swagger UI at /docs, schema at /openapi.json
        .merge(openapi::create_docs_router())
        // Attach state
        .with_state(state)
}
