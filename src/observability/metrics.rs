//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_queries_total` (counter): handled queries by outcome
//! - `gateway_query_duration_seconds` (histogram): end-to-end latency by outcome
//! - `gateway_upstream_attempts_total` (counter): outbound attempts by result
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until an
//!   exporter is installed
//! - Prometheus exporter runs its own HTTP listener

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed `/api/query` call.
pub fn record_query(outcome: &'static str, start: Instant) {
    metrics::counter!("gateway_queries_total", "outcome" => outcome).increment(1);
    metrics::histogram!("gateway_query_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record one outbound attempt.
pub fn record_upstream_attempt(ok: bool) {
    let result = if ok { "ok" } else { "error" };
    metrics::counter!("gateway_upstream_attempts_total", "result" => result).increment(1);
}
