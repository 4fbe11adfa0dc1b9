//! Search-index log shipping configuration.

use serde::{Deserialize, Serialize};

/// Configuration for shipping structured log records to a search index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogIndexConfig {
    /// Whether log shipping is enabled (console logging is always on)
    #[serde(default)]
    pub enabled: bool,

    /// Search index host
    #[serde(default = "default_index_host")]
    pub host: String,

    /// Search index port
    #[serde(default = "default_index_port")]
    pub port: u16,

    /// Index name documents are written to
    #[serde(default = "default_index_name")]
    pub index: String,

    /// Log level filter (overridable via `RUST_LOG`)
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Fall back to console-only logging when the shipper cannot be built.
    /// Set to `false` to make a missing index a startup error.
    #[serde(default = "default_graceful_fallback")]
    pub graceful_fallback: bool,
}

fn default_index_host() -> String {
    "localhost".to_string()
}

const fn default_index_port() -> u16 {
    9200
}

fn default_index_name() -> String {
    "signup-logs".to_string()
}

fn default_log_filter() -> String {
    "signup_server=debug,presentation_http=debug,infrastructure=debug,application=debug,tower_http=info".to_string()
}

const fn default_graceful_fallback() -> bool {
    true
}

impl Default for LogIndexConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_index_host(),
            port: default_index_port(),
            index: default_index_name(),
            log_filter: default_log_filter(),
            graceful_fallback: default_graceful_fallback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_console_only() {
        let config = LogIndexConfig::default();
        assert!(!config.enabled);
        assert!(config.graceful_fallback);
        assert_eq!(config.index, "signup-logs");
        assert_eq!(config.port, 9200);
    }

    #[test]
    fn missing_fields_default_when_deserializing() {
        let json = r#"{"enabled": true, "host": "search.internal"}"#;
        let parsed: LogIndexConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.enabled);
        assert_eq!(parsed.host, "search.internal");
        assert_eq!(parsed.port, 9200);
        assert!(parsed.graceful_fallback);
    }
}
