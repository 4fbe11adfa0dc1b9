//! Password hashing port

use domain::value_objects::PasswordHash;

use crate::error::ApplicationError;

/// Port for one-way credential hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext credential with a fresh salt
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, ApplicationError>;

    /// Verify a plaintext credential against a stored hash
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn PasswordHasher) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PasswordHasher>();
    }
}
