//! User registration use cases
//!
//! One service method per HTTP operation. Every method performs a single
//! persistence call and reports its outcome through tracing; failure,
//! absence, and success stay distinguishable in the returned type.

use std::sync::Arc;

use domain::{
    commands::RegisterUser,
    entities::User,
    value_objects::{EmailAddress, UserId, Username},
};
use tracing::{info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{PasswordHasher, UserStore},
};

/// Service for registering and querying users
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Create a new user service
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Register a new user
    ///
    /// Validates the raw command into domain types, hashes the credential,
    /// and persists the resulting entity.
    #[instrument(skip(self, cmd), fields(username = %cmd.username))]
    pub async fn register(&self, cmd: RegisterUser) -> Result<User, ApplicationError> {
        let email = EmailAddress::new(&cmd.email)?;
        let username = Username::new(&cmd.username)?;
        let password_hash = self.hasher.hash(&cmd.password)?;

        let user = User::new(cmd.first_name, cmd.last_name, email, username, password_hash);
        self.store.insert(&user).await?;

        info!(user_id = %user.id(), "User registered");
        Ok(user)
    }

    /// List all users, newest first
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, ApplicationError> {
        let users = self.store.list().await?;
        info!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Fetch a single user by identifier
    ///
    /// Returns `Ok(None)` when no such user exists; errors are reserved for
    /// actual persistence failures.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>, ApplicationError> {
        let user = self.store.get(id).await?;
        if user.is_none() {
            warn!("User not found");
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use domain::value_objects::PasswordHash;
    use mockall::mock;

    use super::*;

    mock! {
        Store {}

        #[async_trait]
        impl UserStore for Store {
            async fn insert(&self, user: &User) -> Result<(), ApplicationError>;
            async fn list(&self) -> Result<Vec<User>, ApplicationError>;
            async fn get(&self, id: &UserId) -> Result<Option<User>, ApplicationError>;
        }
    }

    mock! {
        Hasher {}

        impl PasswordHasher for Hasher {
            fn hash(&self, plaintext: &str) -> Result<PasswordHash, ApplicationError>;
            fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, ApplicationError>;
        }
    }

    fn phc() -> PasswordHash {
        PasswordHash::from_phc_string("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA").unwrap()
    }

    fn sample_command() -> RegisterUser {
        RegisterUser {
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            username: "asmith".to_string(),
            password: "correct horse battery staple".to_string(),
        }
    }

    fn sample_user() -> User {
        User::new(
            "Alice",
            "Smith",
            EmailAddress::new("alice@example.com").unwrap(),
            Username::new("asmith").unwrap(),
            phc(),
        )
    }

    #[tokio::test]
    async fn register_hashes_and_inserts() {
        let mut store = MockStore::new();
        store.expect_insert().times(1).returning(|_| Ok(()));

        let mut hasher = MockHasher::new();
        hasher
            .expect_hash()
            .withf(|plaintext| plaintext == "correct horse battery staple")
            .times(1)
            .returning(|_| Ok(phc()));

        let service = UserService::new(Arc::new(store), Arc::new(hasher));
        let user = service.register(sample_command()).await.unwrap();

        assert_eq!(user.username().as_str(), "asmith");
        assert_eq!(user.email().as_str(), "alice@example.com");
        assert_ne!(user.password_hash().as_str(), "correct horse battery staple");
    }

    #[tokio::test]
    async fn register_rejects_invalid_email_before_touching_the_store() {
        let mut store = MockStore::new();
        store.expect_insert().times(0);
        let mut hasher = MockHasher::new();
        hasher.expect_hash().times(0);

        let service = UserService::new(Arc::new(store), Arc::new(hasher));
        let mut cmd = sample_command();
        cmd.email = "invalid_email_format".to_string();

        let result = service.register(cmd).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(
                domain::DomainError::InvalidEmailAddress(_)
            ))
        ));
    }

    #[tokio::test]
    async fn register_rejects_empty_username() {
        let store = MockStore::new();
        let hasher = MockHasher::new();
        let service = UserService::new(Arc::new(store), Arc::new(hasher));

        let mut cmd = sample_command();
        cmd.username = String::new();

        let result = service.register(cmd).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(
                domain::DomainError::InvalidUsername(_)
            ))
        ));
    }

    #[tokio::test]
    async fn register_propagates_store_failure() {
        let mut store = MockStore::new();
        store
            .expect_insert()
            .returning(|_| Err(ApplicationError::Database("disk full".to_string())));
        let mut hasher = MockHasher::new();
        hasher.expect_hash().returning(|_| Ok(phc()));

        let service = UserService::new(Arc::new(store), Arc::new(hasher));
        let result = service.register(sample_command()).await;
        assert!(matches!(result, Err(ApplicationError::Database(_))));
    }

    #[tokio::test]
    async fn list_users_returns_store_contents() {
        let mut store = MockStore::new();
        store
            .expect_list()
            .returning(|| Ok(vec![sample_user(), sample_user()]));

        let service = UserService::new(Arc::new(store), Arc::new(MockHasher::new()));
        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn list_users_empty_is_ok_not_an_error() {
        let mut store = MockStore::new();
        store.expect_list().returning(|| Ok(Vec::new()));

        let service = UserService::new(Arc::new(store), Arc::new(MockHasher::new()));
        let users = service.list_users().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn get_user_distinguishes_absence_from_failure() {
        let mut store = MockStore::new();
        store.expect_get().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(store), Arc::new(MockHasher::new()));
        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Ok(None)));

        let mut failing = MockStore::new();
        failing
            .expect_get()
            .returning(|_| Err(ApplicationError::Database("locked".to_string())));
        let service = UserService::new(Arc::new(failing), Arc::new(MockHasher::new()));
        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(ApplicationError::Database(_))));
    }

    #[tokio::test]
    async fn get_user_returns_the_matching_entity() {
        let user = sample_user();
        let id = user.id();
        let mut store = MockStore::new();
        let returned = user.clone();
        store
            .expect_get()
            .withf(move |candidate| *candidate == id)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = UserService::new(Arc::new(store), Arc::new(MockHasher::new()));
        let fetched = service.get_user(&id).await.unwrap().unwrap();
        assert_eq!(fetched.id(), id);
    }
}
