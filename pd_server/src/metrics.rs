//! Prometheus metrics for the best-time server.
//!
//! Metrics are exposed in Prometheus text format on a separate listener
//! when one is configured.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use pd_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::http_requests_total("GET", "/highscore", 200);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
///
/// # Errors
///
/// Returns an error message if the exporter can't be installed.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Best Time Metrics
// ============================================================================

/// Count an accepted submission.
pub fn submissions_total() {
    metrics::counter!("best_time_submissions_total").increment(1);
}

/// Count a rejected submission.
pub fn submissions_rejected_total() {
    metrics::counter!("best_time_submissions_rejected_total").increment(1);
}

/// Count a new record.
pub fn new_records_total() {
    metrics::counter!("best_time_new_records_total").increment(1);
}

/// Current record in seconds.
pub fn best_time_seconds(time: u32) {
    metrics::gauge!("best_time_seconds").set(f64::from(time));
}

/// Record a submitted completion time.
pub fn submitted_time_seconds(time: u32) {
    metrics::histogram!("best_time_submitted_seconds").record(f64::from(time));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_exporter() {
        // No recorder installed: calls are no-ops and must not panic.
        http_requests_total("GET", "/highscore", 200);
        http_request_duration_ms("POST", "/highscore", 1.5);
        submissions_total();
        submissions_rejected_total();
        new_records_total();
        best_time_seconds(42);
        submitted_time_seconds(42);
    }
}
