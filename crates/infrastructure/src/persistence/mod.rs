//! SQLite persistence
//!
//! Connection pooling and the `UserStore` port implementation.

mod connection;
mod user_store;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use user_store::SqliteUserStore;
