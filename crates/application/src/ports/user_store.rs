//! User storage port
//!
//! Defines the interface for user persistence.

use async_trait::async_trait;
use domain::{entities::User, value_objects::UserId};

use crate::error::ApplicationError;

/// Port for user storage operations
///
/// Outcomes are tagged rather than collapsed into a sentinel: `Err` means
/// the operation failed, `Ok(None)` means the row does not exist, and an
/// empty `Ok(vec)` is a successful, empty listing.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user
    async fn insert(&self, user: &User) -> Result<(), ApplicationError>;

    /// List all users, newest first
    async fn list(&self) -> Result<Vec<User>, ApplicationError>;

    /// Fetch a single user by identifier
    async fn get(&self, id: &UserId) -> Result<Option<User>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Simple compile-time verification that the trait is object-safe
    fn _assert_object_safe(_: &dyn UserStore) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn UserStore>();
    }
}
