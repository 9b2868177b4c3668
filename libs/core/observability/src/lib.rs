//! Observability utilities for the task API.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Metrics for task-store operations (latency, outcome, timeouts)
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, StoreTimer};
//!
//! init_metrics()?;
//!
//! let timer = StoreTimer::start("find_one");
//! // ... call the store ...
//! timer.finish(StoreOutcome::Ok);
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod middleware;
pub mod store;

pub use middleware::metrics_middleware;
pub use store::{StoreMetrics, StoreOutcome, StoreTimer};

pub use metrics_exporter_prometheus::BuildError;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Call once at startup; later calls return the existing handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");

        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

/// Register metric descriptions for documentation
fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_histogram;

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Task store metrics
    describe_counter!(
        "task_store_operations_total",
        "Task store operations by operation and outcome"
    );
    describe_histogram!(
        "task_store_operation_duration_seconds",
        "Task store operation duration in seconds"
    );
    describe_counter!(
        "task_store_timeouts_total",
        "Task store operations abandoned after the per-call deadline"
    );
}
