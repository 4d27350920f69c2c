//! Error types for spamscore

/// Result type alias using spamscore's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for spamscore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Scorer precondition violated (e.g. threshold outside [0, 1])
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Classifier cannot produce class probabilities
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),

    /// Artifact is structurally invalid or inconsistent with its peer
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Tensor computation failed or produced a non-finite probability
    #[error("inference error: {0}")]
    Inference(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new unsupported model error
    pub fn unsupported_model(msg: impl Into<String>) -> Self {
        Self::UnsupportedModel(msg.into())
    }

    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short, stable name of the variant for metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::UnsupportedModel(_) => "unsupported_model",
            Self::Artifact(_) => "artifact",
            Self::Inference(_) => "inference",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Internal(_) => "internal",
        }
    }
}
