//! Application state shared across all requests

use crate::config::ServerConfig;
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use spamscore_classifiers::{ModelBundle, Scorer};
use std::sync::Arc;
use tracing::{error, info};

/// Built once at startup and handed to every handler; read-only afterwards
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Loaded classifier and vectorizer with the decision threshold
    pub scorer: Scorer,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Load the artifacts named in `config`.
    ///
    /// A missing or corrupt artifact is logged and returned as an error so
    /// the process never starts serving.
    pub fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        info!("Initializing application state");

        let bundle = ModelBundle::load(&config.classifier_path, &config.vectorizer_path)
            .map_err(|e| {
                error!("Error loading model or vectorizer: {}", e);
                e
            })?;

        Self::with_bundle(config, Arc::new(bundle), metrics_handle)
    }

    /// Build state around an already loaded bundle
    pub fn with_bundle(
        config: ServerConfig,
        bundle: Arc<ModelBundle>,
        metrics_handle: PrometheusHandle,
    ) -> Result<Self> {
        let scorer = Scorer::new(bundle, config.threshold)?;
        info!("Scoring with threshold {}", scorer.threshold());

        Ok(Self {
            config: Arc::new(config),
            scorer,
            metrics_handle,
        })
    }
}
