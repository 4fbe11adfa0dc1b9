//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (validation, not-found construction)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Credential hashing failed
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// Persistence failure
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_converts_transparently() {
        let err: ApplicationError = DomainError::not_found("User", "42").into();
        assert_eq!(err.to_string(), "User not found: 42");
    }

    #[test]
    fn database_error_message() {
        let err = ApplicationError::Database("disk I/O error".to_string());
        assert_eq!(err.to_string(), "Database error: disk I/O error");
    }

    #[test]
    fn hashing_error_message() {
        let err = ApplicationError::Hashing("salt generation failed".to_string());
        assert_eq!(
            err.to_string(),
            "Password hashing error: salt generation failed"
        );
    }
}
