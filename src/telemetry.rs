use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

/// Initialize structured logging.
///
/// Honors `RUST_LOG` when set; defaults to `info` otherwise.
pub fn init_tracing(service_name: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    tracing::info!(service = service_name, "tracing initialized");
}

/// Install the Prometheus recorder when metrics are enabled.
///
/// Returns `None` when disabled; callers wire the handle into the
/// `/metrics` route, which answers 503 without one.
pub fn init_metrics(enabled: bool) -> Option<PrometheusHandle> {
    if !enabled {
        return None;
    }
    Some(
        PrometheusBuilder::new()
            .install_recorder()
            .expect("install Prometheus recorder"),
    )
}
