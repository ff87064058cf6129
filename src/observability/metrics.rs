//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_builds_total` (counter): successful builds by `engine`
//! - `router_build_conflicts_total` (counter): builds rejected for conflicts
//! - `router_build_duration_seconds` (histogram): automaton + encoding time
//! - `router_states` (gauge): state count of the last built router
//! - `router_reloads_total` (counter): config reloads by `outcome`
//!
//! # Design Decisions
//! - Build-time only; `Router::route` stays free of atomics
//! - Recorder installation is explicit through [`init_metrics`]

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Record a successful router build.
pub fn record_build(engine: &'static str, states: usize, elapsed: Duration) {
    metrics::counter!("router_builds_total", "engine" => engine).increment(1);
    metrics::histogram!("router_build_duration_seconds").record(elapsed.as_secs_f64());
    metrics::gauge!("router_states").set(states as f64);
}

/// Record a build rejected because routes overlap.
pub fn record_conflict() {
    metrics::counter!("router_build_conflicts_total").increment(1);
}

/// Record a configuration reload attempt; `outcome` is `"ok"` or `"error"`.
pub fn record_reload(outcome: &'static str) {
    metrics::counter!("router_reloads_total", "outcome" => outcome).increment(1);
}

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, address = %addr, "Failed to install metrics exporter"),
    }
}
