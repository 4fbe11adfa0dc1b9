//! OpenAPI documentation module
//!
//! Serves the interactive docs at `/docs` and the machine-readable schema at
//! `/openapi.json` - the same paths the fault-injection middleware exempts.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{error, handlers, state::AppState};

/// OpenAPI documentation for the signup service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Signup API",
        version = "0.1.0",
        description = "User registration service with built-in fault injection for resilience testing",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "users", description = "User registration and lookup")
    ),
    paths(
        handlers::health::health_check,
        handlers::users::register_user,
        handlers::users::list_users,
        handlers::users::get_user,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::users::CreateUserRequest,
            handlers::users::UserResponse,
            error::ErrorBody,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create the documentation routes
pub fn create_docs_router() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_spec_is_valid() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        assert!(json.contains("Signup API"));
        assert!(json.contains("/health"));
        assert!(json.contains("/users/"));
    }

    #[test]
    fn openapi_has_all_tags() {
        let doc = ApiDoc::openapi();
        let tags: Vec<&str> = doc
            .tags
            .as_ref()
            .map(|t| t.iter().map(|tag| tag.name.as_str()).collect())
            .unwrap_or_default();

        assert!(tags.contains(&"health"));
        assert!(tags.contains(&"users"));
    }

    #[test]
    fn openapi_documents_the_user_schemas() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.schemas.contains_key("CreateUserRequest"));
        assert!(components.schemas.contains_key("UserResponse"));
        assert!(components.schemas.contains_key("ErrorBody"));
    }
}
