//! Search-index log shipping layer
//!
//! A `tracing_subscriber` layer that serializes events to JSON documents and
//! hands them to a background task, which POSTs each one to the index's
//! document endpoint. The request path never blocks on the sink: a full
//! buffer drops the record and bumps a counter.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{Event, Subscriber, field::Field};
use tracing_subscriber::layer::{Context, Layer};

use super::TelemetryError;
use crate::config::LogIndexConfig;

/// Buffered records before the shipper starts dropping
const CHANNEL_CAPACITY: usize = 1024;

/// Per-document request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Subscriber layer that ships log events to a search index
pub struct SearchIndexLayer {
    tx: mpsc::Sender<Value>,
    dropped: Arc<AtomicU64>,
}

impl std::fmt::Debug for SearchIndexLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndexLayer")
            .field("dropped", &self.dropped.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl SearchIndexLayer {
    /// Build a layer shipping to the configured index
    ///
    /// Returns the layer and the handle of the background shipping task; the
    /// task exits once every clone of the layer has been dropped.
    pub fn from_config(config: &LogIndexConfig) -> Result<(Self, JoinHandle<()>), TelemetryError> {
        let endpoint = format!(
            "http://{}:{}/{}/_doc",
            config.host, config.port, config.index
        );
        Self::with_endpoint(&endpoint)
    }

    /// Build a layer shipping to an explicit document endpoint
    pub fn with_endpoint(endpoint: &str) -> Result<(Self, JoinHandle<()>), TelemetryError> {
        let url = reqwest::Url::parse(endpoint)
            .map_err(|e| TelemetryError::Shipper(format!("invalid endpoint {endpoint}: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TelemetryError::Shipper(e.to_string()))?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let handle = tokio::spawn(ship_records(client, url, rx));

        Ok((
            Self {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            handle,
        ))
    }

    /// Number of records dropped because the buffer was full
    #[must_use]
    pub fn dropped_records(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Background loop draining the channel into the index
///
/// Shipping failures are swallowed silently on purpose: emitting a tracing
/// event from here would feed straight back into this layer.
async fn ship_records(client: reqwest::Client, url: reqwest::Url, mut rx: mpsc::Receiver<Value>) {
    while let Some(doc) = rx.recv().await {
        let _ = client.post(url.clone()).json(&doc).send().await;
    }
}

/// Field visitor collecting event fields into a JSON map
struct JsonVisitor<'a>(&'a mut Map<String, Value>);

impl tracing::field::Visit for JsonVisitor<'_> {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.0
            .insert(field.name().to_string(), value.to_string().into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{value:?}").into());
    }
}

impl<S: Subscriber> Layer<S> for SearchIndexLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Map::new();
        let mut visitor = JsonVisitor(&mut fields);
        event.record(&mut visitor);

        let meta = event.metadata();
        let doc = serde_json::json!({
            "@timestamp": Utc::now().to_rfc3339(),
            "level": meta.level().to_string(),
            "target": meta.target(),
            "fields": Value::Object(fields),
        });

        if self.tx.try_send(doc).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}
