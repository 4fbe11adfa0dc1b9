//! SQLite user store implementation
//!
//! Implements the `UserStore` port using SQLite. Each operation checks out a
//! pooled connection on a blocking thread and performs exactly one statement
//! or transaction.

use std::sync::Arc;

use application::{error::ApplicationError, ports::UserStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{
    entities::User,
    value_objects::{EmailAddress, PasswordHash, UserId, Username},
};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based user store
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    pool: Arc<ConnectionPool>,
    force_rollback: bool,
}

impl SqliteUserStore {
    /// Create a new SQLite user store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self {
            pool,
            force_rollback: false,
        }
    }

    /// Roll back write transactions instead of committing them.
    ///
    /// Test hook wired from `DatabaseConfig::force_rollback`: registration
    /// paths run end to end but leave no durable rows behind.
    #[must_use]
    pub const fn with_force_rollback(mut self, force_rollback: bool) -> Self {
        self.force_rollback = force_rollback;
        self
    }
}

fn conversion_error(index: usize, e: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

/// Convert a database row to a `User`
fn row_to_user(row: &Row<'_>) -> Result<User, rusqlite::Error> {
    let user_id_str: String = row.get(0)?;
    let first_name: String = row.get(1)?;
    let last_name: String = row.get(2)?;
    let email_str: String = row.get(3)?;
    let username_str: String = row.get(4)?;
    let password_hash_str: String = row.get(5)?;
    let created_at_str: String = row.get(6)?;
    let updated_at_str: Option<String> = row.get(7)?;
    let deleted_at_str: Option<String> = row.get(8)?;

    let user_id = UserId::parse(&user_id_str).map_err(|e| conversion_error(0, e))?;
    let email = EmailAddress::new(&email_str).map_err(|e| conversion_error(3, e))?;
    let username = Username::new(&username_str).map_err(|e| conversion_error(4, e))?;
    let password_hash =
        PasswordHash::from_phc_string(password_hash_str).map_err(|e| conversion_error(5, e))?;

    Ok(User::restore(
        user_id,
        first_name,
        last_name,
        email,
        username,
        password_hash,
        parse_timestamp(&created_at_str),
        updated_at_str.as_deref().map(parse_timestamp),
        deleted_at_str.as_deref().map(parse_timestamp),
    ))
}

#[async_trait]
impl UserStore for SqliteUserStore {
    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn insert(&self, user: &User) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let user = user.clone();
        let force_rollback = self.force_rollback;

        task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| ApplicationError::Database(e.to_string()))?;

            let tx = conn
                .transaction()
                .map_err(|e| ApplicationError::Database(e.to_string()))?;

            tx.execute(
                "INSERT INTO users (user_id, first_name, last_name, email, username,
                                    password_hash, created_at, updated_at, deleted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    user.id().to_string(),
                    user.first_name(),
                    user.last_name(),
                    user.email().as_str(),
                    user.username().as_str(),
                    user.password_hash().as_str(),
                    user.created_at().to_rfc3339(),
                    user.updated_at().map(|t| t.to_rfc3339()),
                    user.deleted_at().map(|t| t.to_rfc3339()),
                ],
            )
            .map_err(|e| ApplicationError::Database(e.to_string()))?;

            if force_rollback {
                tx.rollback()
                    .map_err(|e| ApplicationError::Database(e.to_string()))?;
                debug!("Insert rolled back (force_rollback set)");
            } else {
                tx.commit()
                    .map_err(|e| ApplicationError::Database(e.to_string()))?;
                debug!("Inserted user row");
            }
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Database(e.to_string()))?;

            let mut stmt = conn
                .prepare(
                    "SELECT user_id, first_name, last_name, email, username,
                            password_hash, created_at, updated_at, deleted_at
                     FROM users
                     ORDER BY created_at DESC, user_id",
                )
                .map_err(|e| ApplicationError::Database(e.to_string()))?;

            let users = stmt
                .query_map([], row_to_user)
                .map_err(|e| ApplicationError::Database(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ApplicationError::Database(e.to_string()))?;

            debug!(count = users.len(), "Listed user rows");
            Ok(users)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn get(&self, id: &UserId) -> Result<Option<User>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Database(e.to_string()))?;

            let user = conn
                .query_row(
                    "SELECT user_id, first_name, last_name, email, username,
                            password_hash, created_at, updated_at, deleted_at
                     FROM users WHERE user_id = ?1",
                    [&id_str],
                    row_to_user,
                )
                .optional()
                .map_err(|e| ApplicationError::Database(e.to_string()))?;

            debug!(found = user.is_some(), "Fetched user row");
            Ok(user)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}
