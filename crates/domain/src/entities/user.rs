//! User entity
//!
//! A registered account holder. The identifier is assigned once at creation
//! and never changes; the credential is only ever held in hashed form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EmailAddress, PasswordHash, UserId, Username};

/// A registered user
///
/// `updated_at` and `deleted_at` are schema-reserved: no operation in this
/// service sets them, but they are persisted and restored so the row layout
/// matches the table definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier, immutable once assigned
    id: UserId,
    /// Given name
    first_name: String,
    /// Family name
    last_name: String,
    /// Validated email address
    email: EmailAddress,
    /// Validated username
    username: Username,
    /// Hashed credential (PHC format)
    password_hash: PasswordHash,
    /// When the account was created
    created_at: DateTime<Utc>,
    /// Reserved; never set by any code path
    updated_at: Option<DateTime<Utc>>,
    /// Reserved; never set by any code path
    deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user with a fresh identifier and creation timestamp
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: EmailAddress,
        username: Username,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            username,
            password_hash,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Restore a user from storage
    #[must_use]
    #[allow(clippy::too_many_arguments)] // one argument per column
    pub const fn restore(
        id: UserId,
        first_name: String,
        last_name: String,
        email: EmailAddress,
        username: Username,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            username,
            password_hash,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    /// Get the user ID
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Get the given name
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Get the family name
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Get the email address
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Get the username
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Get the hashed credential
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Get the creation timestamp
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the last update timestamp (always `None` in this service)
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Get the soft-deletion timestamp (always `None` in this service)
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}
