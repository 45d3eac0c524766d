//! Error types for incident triage

/// Result type alias using the triage Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for triage operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model artifact absent or unparseable; recoverable, retried on next request
    #[error("model not trained: {0}")]
    ModelNotTrained(String),

    /// Training corpus has no usable rows; fails the training run loudly
    #[error("empty corpus: {0}")]
    EmptyCorpus(String),

    /// Training corpus parsing errors
    #[error("corpus error: {0}")]
    Corpus(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new model-not-trained error
    pub fn model_not_trained(msg: impl Into<String>) -> Self {
        Self::ModelNotTrained(msg.into())
    }

    /// Create a new empty-corpus error
    pub fn empty_corpus(msg: impl Into<String>) -> Self {
        Self::EmptyCorpus(msg.into())
    }

    /// Create a new corpus error
    pub fn corpus(msg: impl Into<String>) -> Self {
        Self::Corpus(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
