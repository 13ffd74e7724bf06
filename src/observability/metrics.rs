//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound requests by operation, status
//! - `gateway_request_duration_seconds` (histogram): inbound latency
//! - `gateway_upstream_calls_total` (counter): upstream calls by operation, outcome
//! - `gateway_upstream_duration_seconds` (histogram): upstream latency
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed inbound request.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!("gateway_requests_total", "operation" => operation, "status" => status.clone())
        .increment(1);
    histogram!("gateway_request_duration_seconds", "operation" => operation, "status" => status)
        .record(start.elapsed().as_secs_f64());
}

/// Record a completed upstream call.
pub fn record_upstream_call(operation: &'static str, outcome: &'static str, start: Instant) {
    counter!("gateway_upstream_calls_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
    histogram!("gateway_upstream_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}
