use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spamscore-server")]
#[command(author, version, about = "Spam propensity scoring service", long_about = None)]
pub struct Cli {
    /// Configuration file path (optional; defaults apply when absent)
    #[arg(short, long, default_value = "spamscore.yaml", env = "SPAMSCORE_CONFIG")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long, env = "SPAMSCORE_LISTEN")]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "SPAMSCORE_PORT")]
    pub port: Option<u16>,

    /// Classifier artifact path
    #[arg(short, long, env = "SPAMSCORE_MODEL")]
    pub model: Option<PathBuf>,

    /// Vectorizer artifact path
    #[arg(long, env = "SPAMSCORE_VECTORIZER")]
    pub vectorizer: Option<PathBuf>,

    /// Decision threshold on the spam probability
    #[arg(short, long, env = "SPAMSCORE_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}
