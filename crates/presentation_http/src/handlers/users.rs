//! User registration handlers
//!
//! REST endpoints over the `UserService`: create, list, and fetch by id.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use domain::{commands::RegisterUser, entities::User, value_objects::UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Create user request body
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({
    "first_name": "Alice",
    "last_name": "Smith",
    "email": "alice@example.com",
    "username": "asmith",
    "password": "correct horse battery staple"
}))]
pub struct CreateUserRequest {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Username
    pub username: String,
    /// Plaintext password; stored only as a salted hash
    pub password: String,
}

/// User representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    pub user_id: Uuid,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Username
    pub username: String,
    /// Stored credential hash (PHC format, never the plaintext)
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().as_uuid(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().as_str().to_string(),
            username: user.username().as_str().to_string(),
            password_hash: user.password_hash().as_str().to_string(),
            created_at: user.created_at(),
        }
    }
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
        (status = 500, description = "Internal error", body = crate::error::ErrorBody)
    )
)]
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let cmd = RegisterUser {
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        username: body.username,
        password: body.password,
    };

    let user = state.user_service.register(cmd).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// List all users, newest first
#[utoipa::path(
    get,
    path = "/users/",
    tag = "users",
    responses(
        (status = 200, description = "All registered users", body = Vec<UserResponse>),
        (status = 500, description = "Internal error", body = crate::error::ErrorBody)
    )
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Fetch a single user by identifier
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "The requested user", body = UserResponse),
        (status = 404, description = "No such user", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed identifier", body = crate::error::ErrorBody),
        (status = 500, description = "Internal error", body = crate::error::ErrorBody)
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = UserId::parse(&id)
        .map_err(|e| ApiError::Validation(format!("Invalid user id: {e}")))?;

    match state.user_service.get_user(&id).await? {
        Some(user) => Ok(Json(UserResponse::from(&user))),
        None => Err(ApiError::NotFound("User not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use domain::value_objects::{EmailAddress, PasswordHash, Username};

    use super::*;

    fn sample_user() -> User {
        User::new(
            "Alice",
            "Smith",
            EmailAddress::new("alice@example.com").unwrap(),
            Username::new("asmith").unwrap(),
            PasswordHash::from_phc_string("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA").unwrap(),
        )
    }

    #[test]
    fn user_response_mirrors_the_entity() {
        let user = sample_user();
        let response = UserResponse::from(&user);
        assert_eq!(response.user_id, user.id().as_uuid());
        assert_eq!(response.username, "asmith");
        assert_eq!(response.email, "alice@example.com");
        assert!(response.password_hash.starts_with("$argon2"));
    }

    #[test]
    fn create_request_deserializes_from_json() {
        let json = r#"{
            "first_name": "Alice",
            "last_name": "Smith",
            "email": "alice@example.com",
            "username": "asmith",
            "password": "secret"
        }"#;
        let request: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "asmith");
        assert_eq!(request.password, "secret");
    }

    #[test]
    fn user_response_serializes_created_at_as_rfc3339() {
        let response = UserResponse::from(&sample_user());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["created_at"].as_str().unwrap().contains('T'));
    }
}
