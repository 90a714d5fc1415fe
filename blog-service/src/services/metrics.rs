//! Prometheus recorder and blog-level counters.
//!
//! HTTP request metrics come from `service_core::middleware::metrics`; this
//! module adds per-operation outcomes and renders everything for /metrics.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder.
///
/// Call once at startup, before anything is recorded. Panics on a second call.
pub fn init_metrics() {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

#[derive(Debug, Clone, Copy)]
pub enum BlogOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl BlogOperation {
    fn as_str(self) -> &'static str {
        match self {
            BlogOperation::List => "list",
            BlogOperation::Get => "get",
            BlogOperation::Create => "create",
            BlogOperation::Update => "update",
            BlogOperation::Delete => "delete",
        }
    }
}

/// Count one completed blog operation by outcome (`ok`, `not_found`, `error`).
pub fn record_blog_operation(operation: BlogOperation, outcome: &'static str) {
    counter!(
        "blog_operations_total",
        "operation" => operation.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}
