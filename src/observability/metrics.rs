//! Metrics collection and exposition.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Initialize metrics exporter and server.
pub fn init_metrics(addr: SocketAddr) {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus recorder");

    tracing::info!("Metrics server listening on http://{}", addr);
}

/// Record one decided request.
pub fn record_decision(method: &str, status: u16, started: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];

    counter!("decision_requests_total", &labels).increment(1);
    histogram!("decision_walk_duration_seconds", &labels)
        .record(started.elapsed().as_secs_f64());
}
