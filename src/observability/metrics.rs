//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by outcome
//!   (`preflight`, `forwarded`, `method_not_allowed`, `missing_fields`,
//!   `domain_rejected`, `timeout`, `bad_gateway`, `internal_error`)
//! - `relay_upstream_responses_total` (counter): forwarded calls by upstream status
//! - `relay_upstream_duration_seconds` (histogram): time to upstream headers

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint and install it as the global recorder.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_outcome(outcome: &'static str) {
    metrics::counter!("relay_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_upstream(status: u16, elapsed: Duration) {
    metrics::counter!("relay_upstream_responses_total", "status" => status.to_string())
        .increment(1);
    metrics::histogram!("relay_upstream_duration_seconds").record(elapsed.as_secs_f64());
}
