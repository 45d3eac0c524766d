//! Configuration for the priority classifier

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use triage_core::{Error, Result};

/// Classifier configuration, usually loaded from a YAML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Path to the trained model artifact
    pub model_path: PathBuf,

    /// Log-score boost added to CRITICAL per matching critical rule.
    /// Ad hoc tuning constant; kept configurable rather than derived.
    #[serde(default = "default_critical_boost")]
    pub critical_boost: f64,

    /// Log-score boost added to HIGH per matching high rule
    #[serde(default = "default_high_boost")]
    pub high_boost: f64,

    /// Append-only feedback log location
    #[serde(default = "default_feedback_log")]
    pub feedback_log: PathBuf,
}

fn default_critical_boost() -> f64 {
    2.0
}

fn default_high_boost() -> f64 {
    1.0
}

fn default_feedback_log() -> PathBuf {
    PathBuf::from("./feedback/feedback.jsonl")
}

impl ClassifierConfig {
    /// Create a configuration with default boosts and feedback location
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            critical_boost: default_critical_boost(),
            high_boost: default_high_boost(),
            feedback_log: default_feedback_log(),
        }
    }

    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::config(format!("invalid config: {e}")))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read config {}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }
}
