//! Password hash value object
//!
//! Wraps a PHC-formatted hash string so that a plaintext credential can never
//! be stored where a hash is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// An opaque, already-hashed credential in PHC string format
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a PHC-formatted hash string
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPasswordHash` if the value does not look
    /// like a PHC string (`$<algorithm>$...`), which would indicate a
    /// plaintext credential leaking into the hash slot.
    pub fn from_phc_string(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if !value.starts_with('$') || value.matches('$').count() < 2 {
            return Err(DomainError::InvalidPasswordHash(
                "expected a PHC-formatted string".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// Get the PHC string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// The hash itself is not a secret, but keeping it out of debug output avoids
// noisy log lines when entities are logged with `{:?}`.
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
