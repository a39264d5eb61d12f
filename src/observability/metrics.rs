//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mock_requests_total` (counter): simulated requests by method, status
//! - `mock_request_duration_seconds` (histogram): handling latency
//! - `mock_routes` (gauge): size of the active route catalogue
//! - `mock_reloads_total` (counter): source document reloads
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter is optional (`observability.metrics_enabled`)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "mock_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("mock_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_routes(count: usize) {
    metrics::gauge!("mock_routes").set(count as f64);
}

pub fn record_reload() {
    metrics::counter!("mock_reloads_total").increment(1);
}
