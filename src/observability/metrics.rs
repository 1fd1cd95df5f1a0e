//! Metrics collection and exposition.
//!
//! # Metrics
//! - `store_health_status` (gauge): 1=UP, 0=DOWN, per component
//! - `store_health_check_duration_seconds` (histogram): check latency, per component
//! - `store_health_checks_total` (counter): checks by component and status

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::health::report::Status;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one component check.
pub fn record_check(component: &str, status: Status, elapsed: Duration) {
    let component = component.to_string();
    let value = if status.is_up() { 1.0 } else { 0.0 };

    ::metrics::gauge!("store_health_status", "component" => component.clone()).set(value);
    ::metrics::histogram!("store_health_check_duration_seconds", "component" => component.clone())
        .record(elapsed.as_secs_f64());
    ::metrics::counter!(
        "store_health_checks_total",
        "component" => component,
        "status" => status.to_string()
    )
    .increment(1);
}
