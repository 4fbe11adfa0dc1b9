//! Email address value object
//!
//! A registration email is trimmed, lowercased, and format-checked before it
//! ever reaches an entity; a `String` that failed validation cannot become an
//! `EmailAddress`.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A validated, normalized email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct EmailAddress {
    #[validate(email)]
    value: String,
}

impl EmailAddress {
    /// Create a new email address, validating the format
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmailAddress` if the format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let value = email.into().trim().to_lowercase();

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidEmailAddress(e.to_string()))?;

        Ok(candidate)
    }

    /// Get the email address as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_is_accepted() {
        let email = EmailAddress::new("alice@example.com").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn email_is_normalized() {
        let email = EmailAddress::new("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn invalid_email_is_rejected() {
        assert!(EmailAddress::new("not-an-email").is_err());
        assert!(EmailAddress::new("@nodomain.com").is_err());
        assert!(EmailAddress::new("").is_err());
    }

    #[test]
    fn corruption_literal_is_rejected() {
        // The literal used by the fault-injection data corruption helper
        // must never validate.
        assert!(EmailAddress::new("invalid_email_format").is_err());
    }

    #[test]
    fn display_matches_as_str() {
        let email = EmailAddress::new("bob@example.com").unwrap();
        assert_eq!(email.to_string(), email.as_str());
    }

    #[test]
    fn serde_roundtrip_is_transparent() {
        let email = EmailAddress::new("bob@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"bob@example.com\"");
        let parsed: EmailAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(email, parsed);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn well_formed_emails_normalize_to_lowercase(
            local in "[A-Za-z][A-Za-z0-9.]{0,12}",
            host in "[A-Za-z][A-Za-z0-9-]{0,8}\\.[a-z]{2,4}"
        ) {
            let input = format!("{local}@{host}");
            if let Ok(email) = EmailAddress::new(&input) {
                prop_assert_eq!(email.as_str(), email.as_str().to_lowercase());
                prop_assert!(email.as_str().contains('@'));
            }
        }

        #[test]
        fn strings_without_at_are_rejected(s in "[a-zA-Z0-9._-]*") {
            prop_assume!(!s.contains('@'));
            prop_assert!(EmailAddress::new(&s).is_err());
        }
    }
}
