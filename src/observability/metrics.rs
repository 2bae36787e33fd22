//! Metrics collection and exposition.
//!
//! # Metrics
//! - `monitor_probes_total` (counter): probes by target, outcome
//! - `monitor_probe_latency_ms` (histogram): probe latency per target
//! - `monitor_target_up` (gauge): 1=up, 0=down or unknown
//! - `monitor_transitions_total` (counter): transitions by target, direction
//! - `monitor_notifications_total` (counter): deliveries by result
//! - `monitor_tick_duration_seconds` (histogram): wall time of a full tick
//!
//! Recording is a no-op until an exporter is installed.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

use crate::health::{ProbeResult, Status};

/// Install the Prometheus exporter and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_probe(target: &str, result: &ProbeResult) {
    let outcome = if result.ok { "ok" } else { "fail" };
    counter!("monitor_probes_total", "target" => target.to_string(), "outcome" => outcome)
        .increment(1);
    if result.ok {
        histogram!("monitor_probe_latency_ms", "target" => target.to_string())
            .record(result.latency.as_secs_f64() * 1000.0);
    }
}

pub fn record_status(target: &str, status: Status) {
    let value = if status == Status::Up { 1.0 } else { 0.0 };
    gauge!("monitor_target_up", "target" => target.to_string()).set(value);
}

pub fn record_transition(target: &str, down: bool) {
    let direction = if down { "down" } else { "up" };
    counter!("monitor_transitions_total", "target" => target.to_string(), "direction" => direction)
        .increment(1);
}

pub fn record_notification(delivered: bool) {
    let result = if delivered { "delivered" } else { "failed" };
    counter!("monitor_notifications_total", "result" => result).increment(1);
}

pub fn record_tick(duration: Duration) {
    histogram!("monitor_tick_duration_seconds").record(duration.as_secs_f64());
}
