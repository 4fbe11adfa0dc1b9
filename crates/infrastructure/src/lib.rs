//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: SQLite
//! persistence, Argon2 credential hashing, configuration loading, telemetry,
//! and the chaos helpers used for resilience testing.

pub mod adapters;
pub mod chaos;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::Argon2PasswordHasher;
pub use chaos::{ErrorKind, FaultProfile, FaultProfileError, InjectedFaultError};
pub use config::{AppConfig, DatabaseConfig, LogIndexConfig, ServerConfig};
pub use persistence::{ConnectionPool, SqliteUserStore, create_pool};
pub use telemetry::{TelemetryError, TelemetryGuard, init_telemetry};
