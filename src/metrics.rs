use anyhow::Context;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use rollbook_config::MetricsConfig;
use std::time::Duration;
use tracing::{debug, info};

/// Installs the Prometheus exporter when a listen address is configured.
///
/// Without an exporter the `metrics` macros below are no-ops.
pub fn init_metrics(config: &MetricsConfig) -> anyhow::Result<()> {
    let Some(addr) = config.listen_addr else {
        debug!("Metrics exporter disabled");
        return Ok(());
    };

    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("rollbook_request_duration_seconds".to_string()),
            &[
                0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
            ],
        )
        .context("failed to set histogram buckets")?
        .with_http_listener(addr)
        .install()
        .context("failed to install Prometheus exporter")?;

    info!(%addr, "Prometheus metrics endpoint listening");
    Ok(())
}

/// Counts one handled request and records its latency.
pub fn track_request(method: &str, status: &'static str, latency: Duration) {
    counter!("rollbook_requests_total", "method" => method.to_string(), "status" => status)
        .increment(1);
    histogram!("rollbook_request_duration_seconds", "method" => method.to_string())
        .record(latency.as_secs_f64());
}

pub fn track_rejection(kind: &'static str) {
    counter!("rollbook_request_failures_total", "kind" => kind).increment(1);
}

/// Keeps `rollbook_connections_active` up while alive.
#[derive(Debug)]
pub struct ConnectionGauge;

impl ConnectionGauge {
    pub fn open() -> Self {
        gauge!("rollbook_connections_active").increment(1.0);
        counter!("rollbook_connections_total").increment(1);
        Self
    }
}

impl Drop for ConnectionGauge {
    fn drop(&mut self) {
        gauge!("rollbook_connections_active").decrement(1.0);
    }
}
