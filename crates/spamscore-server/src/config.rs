//! Server configuration

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use spamscore_classifiers::{validate_threshold, DEFAULT_THRESHOLD};
use spamscore_core::{Error, Result};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Serialized classifier produced by the training pipeline
    #[serde(default = "default_classifier_path")]
    pub classifier_path: PathBuf,

    /// Serialized vectorizer produced by the training pipeline
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,

    /// Spam probability at or above which a text is flagged
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if let Some(model) = &cli.model {
            config.classifier_path = model.clone();
        }
        if let Some(vectorizer) = &cli.vectorizer {
            config.vectorizer_path = vectorizer.clone();
        }
        if let Some(threshold) = cli.threshold {
            config.threshold = threshold;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot start with
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold).map_err(|e| Error::config(e.to_string()))?;
        if self.max_body_bytes == 0 {
            return Err(Error::config("max_body_bytes must be greater than zero"));
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Parsed listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.listen, self.port)
            .parse()
            .map_err(|e| Error::config(format!("invalid listen address {}: {}", self.listen, e)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            classifier_path: default_classifier_path(),
            vectorizer_path: default_vectorizer_path(),
            threshold: default_threshold(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_classifier_path() -> PathBuf {
    PathBuf::from("artifacts/best_model.json")
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("artifacts/vectorizer.json")
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}
