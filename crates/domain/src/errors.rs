//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Invalid username
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Malformed password hash
    #[error("Invalid password hash: {0}")]
    InvalidPasswordHash(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("User", "abc-123");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "User");
                assert_eq!(id, "abc-123");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("User", "abc-123");
        assert_eq!(err.to_string(), "User not found: abc-123");
    }

    #[test]
    fn invalid_email_error_message() {
        let err = DomainError::InvalidEmailAddress("bad-email".to_string());
        assert_eq!(err.to_string(), "Invalid email address: bad-email");
    }

    #[test]
    fn invalid_username_error_message() {
        let err = DomainError::InvalidUsername("must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid username: must not be empty");
    }

    #[test]
    fn invalid_password_hash_error_message() {
        let err = DomainError::InvalidPasswordHash("not a PHC string".to_string());
        assert_eq!(err.to_string(), "Invalid password hash: not a PHC string");
    }
}
