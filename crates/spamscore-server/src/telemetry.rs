//! Logging and metrics initialization

use crate::cli::LogFormat;
use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

pub const REQUESTS_TOTAL: &str = "spamscore_requests_total";
pub const PREDICTIONS_TOTAL: &str = "spamscore_predictions_total";
pub const ERRORS_TOTAL: &str = "spamscore_errors_total";
pub const SCORE_LATENCY_US: &str = "spamscore_score_latency_us";

/// Initialize tracing/logging
pub fn init_tracing(verbose: bool, format: LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("spamscore=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spamscore=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

/// Install the Prometheus recorder and return its handle for rendering
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    describe_metrics();

    info!("Metrics exporter initialized");
    Ok(handle)
}

fn describe_metrics() {
    metrics::describe_counter!(REQUESTS_TOTAL, "Total number of scoring requests received");
    metrics::describe_counter!(
        PREDICTIONS_TOTAL,
        "Total number of successful predictions by label"
    );
    metrics::describe_counter!(ERRORS_TOTAL, "Total number of failed requests by error kind");
    metrics::describe_histogram!(
        SCORE_LATENCY_US,
        metrics::Unit::Microseconds,
        "Scoring latency in microseconds"
    );
}
