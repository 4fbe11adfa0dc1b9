//! Telemetry: console logging plus optional search-index shipping
//!
//! Console logging is always on. When the log-index sink is enabled, a
//! second subscriber layer serializes every event to JSON and ships it to
//! the configured search index in the background. If the shipper cannot be
//! built, the fallback to console-only logging is explicit: a warning at
//! startup, never a silent downgrade.

mod search_index;

use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogIndexConfig;

pub use search_index::SearchIndexLayer;

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize the tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// Failed to build the search-index shipper
    #[error("Failed to build search-index shipper: {0}")]
    Shipper(String),
}

/// Guard that tears down the log shipper when dropped
pub struct TelemetryGuard {
    shipper: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for TelemetryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryGuard")
            .field("shipping", &self.shipper.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        // The guard outlives every request; by the time it drops the process
        // is exiting and any buffered records are best-effort.
        if let Some(handle) = self.shipper.take() {
            handle.abort();
        }
    }
}

/// Initialize telemetry with the given configuration
///
/// Returns a guard that must be kept alive for the duration of the
/// application. Must be called from within a tokio runtime when shipping is
/// enabled (the shipper runs as a background task).
pub fn init_telemetry(config: &LogIndexConfig) -> Result<TelemetryGuard, TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    if !config.enabled {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;

        info!("Telemetry initialized (search-index shipping disabled, console only)");
        return Ok(TelemetryGuard { shipper: None });
    }

    match SearchIndexLayer::from_config(config) {
        Ok((layer, handle)) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(layer)
                .try_init()
                .map_err(|e| TelemetryError::Init(e.to_string()))?;

            info!(
                host = %config.host,
                port = config.port,
                index = %config.index,
                "Telemetry initialized with search-index shipping"
            );
            Ok(TelemetryGuard {
                shipper: Some(handle),
            })
        },
        Err(e) if config.graceful_fallback => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| TelemetryError::Init(e.to_string()))?;

            warn!(
                error = %e,
                "Search index unavailable, falling back to console-only logging"
            );
            Ok(TelemetryGuard { shipper: None })
        },
        Err(e) => Err(e),
    }
}
