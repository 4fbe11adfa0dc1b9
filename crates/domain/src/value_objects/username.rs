//! Username value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Maximum accepted username length, matching the `username` column width.
const MAX_LEN: usize = 100;

/// A non-empty, length-bounded username
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Create a new username, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUsername` if the trimmed value is empty
    /// or longer than 100 characters.
    pub fn new(username: impl Into<String>) -> Result<Self, DomainError> {
        let value = username.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::InvalidUsername(
                "must not be empty".to_string(),
            ));
        }
        if value.chars().count() > MAX_LEN {
            return Err(DomainError::InvalidUsername(format!(
                "must be at most {MAX_LEN} characters"
            )));
        }

        Ok(Self(value))
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Username {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
