//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the /metrics endpoint handler.

use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const PRODUCTS_CREATED: &str = "products_created_total";
pub const PRODUCTS_SEEDED: &str = "products_seeded_total";
pub const PRODUCT_VALIDATION_FAILURES: &str = "product_validation_failures_total";

/// Initialize the metrics recorder.
///
/// This must be called once at startup before any metrics are recorded.
/// Panics if called more than once.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }

    describe_counter!(PRODUCTS_CREATED, "Products created through POST /api/products");
    describe_counter!(PRODUCTS_SEEDED, "Sample products inserted by the seed endpoint");
    describe_counter!(
        PRODUCT_VALIDATION_FAILURES,
        "Product payloads rejected by validation"
    );
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}
