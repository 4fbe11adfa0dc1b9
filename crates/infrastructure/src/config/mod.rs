//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `log_index`: search-index log shipping settings
//!
//! Configuration is loaded once at startup and never reloaded. The fault
//! profile is intentionally absent here: its rate and weights are compiled-in
//! constants (`chaos::FaultProfile::default`), not an external surface.

mod database;
mod log_index;
mod server;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use log_index::LogIndexConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Search-index log shipping configuration
    #[serde(default)]
    pub log_index: LogIndexConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config.toml`, and
    /// `SIGNUP_*` environment overrides (double underscore separates
    /// nesting levels, e.g. `SIGNUP_SERVER__PORT=8080`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("SIGNUP")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
