//! Password hashing adapter using Argon2
//!
//! Implements the `PasswordHasher` port with Argon2id, producing
//! PHC-formatted strings with a per-hash random salt.

use application::{error::ApplicationError, ports::PasswordHasher};
use argon2::{
    Argon2, PasswordHash as ArgonHash, PasswordHasher as ArgonPasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use domain::value_objects::PasswordHash;
use tracing::{debug, instrument};

/// Argon2id credential hasher
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a new hasher with the Argon2 default parameters
    /// (19 MiB memory, 2 iterations, parallelism 1)
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    #[instrument(skip(self, plaintext))]
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, ApplicationError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| ApplicationError::Hashing(e.to_string()))?;

        debug!("Hashed credential");
        PasswordHash::from_phc_string(hash.to_string()).map_err(ApplicationError::from)
    }

    #[instrument(skip(self, plaintext, hash))]
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, ApplicationError> {
        let parsed = ArgonHash::new(hash.as_str())
            .map_err(|e| ApplicationError::Hashing(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}
