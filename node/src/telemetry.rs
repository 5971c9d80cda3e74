// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use lms_store::{Document, DocumentStore, StoreResult};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::sync::OnceLock;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const REQUESTS_TOTAL: &str = "lms_requests_total";
pub const REQUEST_DURATION: &str = "lms_request_duration_seconds";
pub const DOCUMENT_SAVES: &str = "lms_document_saves_total";

/// Initialize telemetry (logs + metrics)
pub fn init_telemetry() {
    // 1. Initialize Tracing (Logs)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "lms_node=debug,lms_store=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Initialize Metrics (Prometheus)
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROM_HANDLE.set(handle).is_err() {
                tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
            }
        }
        Err(e) => tracing::warn!("Prometheus recorder not installed: {}", e),
    }

    metrics::describe_counter!(REQUESTS_TOTAL, "Requests answered, by endpoint and status");
    metrics::describe_histogram!(REQUEST_DURATION, "Time spent in one load/transform/save cycle");
    metrics::describe_counter!(DOCUMENT_SAVES, "Full-document writes to the backing store");

    metrics::gauge!("lms_node_up", 1.0);
}

/// Records one answered request.
pub fn record_request(endpoint: &'static str, status: u16, seconds: f64) {
    metrics::counter!(REQUESTS_TOTAL, 1, "endpoint" => endpoint, "status" => status.to_string());
    metrics::histogram!(REQUEST_DURATION, seconds, "endpoint" => endpoint);
}

/// Get the Prometheus handle to render metrics
pub fn get_metrics() -> String {
    if let Some(handle) = PROM_HANDLE.get() {
        handle.render()
    } else {
        "# metrics not initialized".to_string()
    }
}

/// Store wrapper counting every full-document save.
pub struct MeteredStore<S> {
    inner: S,
}

impl<S: DocumentStore> MeteredStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: DocumentStore> DocumentStore for MeteredStore<S> {
    fn load(&self) -> StoreResult<Document> {
        self.inner.load()
    }

    fn save(&self, doc: &Document) -> StoreResult<()> {
        self.inner.save(doc)?;
        metrics::counter!(DOCUMENT_SAVES, 1);
        Ok(())
    }
}
