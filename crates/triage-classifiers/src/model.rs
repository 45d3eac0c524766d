//! Trained model artifact: serialization, loading, validation
//!
//! The artifact is a versioned JSON document produced once per training run
//! and loaded wholesale by the classifier. There is no incremental update;
//! retraining replaces the artifact. Only the trainer writes it and only the
//! classifier reads it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use triage_core::{Error, PriorityClass, Result};

/// Canonical artifact schema version. Older shapes are converted offline by
/// the trainer's `migrate` command, never sniffed at runtime.
pub const SCHEMA_VERSION: u32 = 2;

/// Default Laplace smoothing constant
pub const DEFAULT_SMOOTHING: f64 = 1.0;

/// Trained multinomial Naive Bayes parameters.
///
/// All maps use `BTreeMap` so the serialized artifact is byte-stable across
/// training runs over the same corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityModel {
    /// Artifact schema version; must equal [`SCHEMA_VERSION`]
    pub schema_version: u32,

    /// Normalized token -> stable feature index, frozen after training
    pub vocabulary: BTreeMap<String, usize>,

    /// Per class: feature index -> occurrence count across that class's examples
    pub class_token_counts: BTreeMap<PriorityClass, BTreeMap<usize, u64>>,

    /// Per class: number of training examples. All four classes are always
    /// present; zero is a valid count and keeps the class in the output
    /// distribution with its smoothed prior.
    pub class_document_counts: BTreeMap<PriorityClass, u64>,

    /// Total training examples across all classes
    pub total_document_count: u64,

    /// Laplace smoothing constant
    pub smoothing: f64,
}

impl PriorityModel {
    /// Create an empty model with all four classes present at zero
    pub fn empty(smoothing: f64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            vocabulary: BTreeMap::new(),
            class_token_counts: PriorityClass::ALL
                .iter()
                .map(|&c| (c, BTreeMap::new()))
                .collect(),
            class_document_counts: PriorityClass::ALL.iter().map(|&c| (c, 0)).collect(),
            total_document_count: 0,
            smoothing,
        }
    }

    /// Load and validate an artifact.
    ///
    /// A missing or unparseable file surfaces as [`Error::ModelNotTrained`]
    /// so callers can treat classification as unavailable and retry on the
    /// next request.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            Error::model_not_trained(format!("cannot read artifact {}: {}", path.display(), e))
        })?;
        let model: Self = serde_json::from_slice(&bytes).map_err(|e| {
            Error::model_not_trained(format!("malformed artifact {}: {}", path.display(), e))
        })?;
        model.validate()?;
        debug!(
            path = %path.display(),
            vocabulary = model.vocabulary.len(),
            documents = model.total_document_count,
            "loaded priority model"
        );
        Ok(model)
    }

    /// Write the artifact atomically (temp file + rename)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Check artifact invariants: supported schema version, a finite positive
    /// smoothing constant, all four classes present in the document counts,
    /// and every token index within the vocabulary.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(Error::model_not_trained(format!(
                "unsupported artifact schema version {} (expected {})",
                self.schema_version, SCHEMA_VERSION
            )));
        }
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(Error::model_not_trained(format!(
                "artifact smoothing constant {} must be finite and positive",
                self.smoothing
            )));
        }
        for class in PriorityClass::ALL {
            if !self.class_document_counts.contains_key(&class) {
                return Err(Error::model_not_trained(format!(
                    "artifact missing document count for class {class}"
                )));
            }
        }
        let vocab_size = self.vocabulary.len();
        for (class, counts) in &self.class_token_counts {
            if let Some((&idx, _)) = counts.iter().next_back() {
                if idx >= vocab_size {
                    return Err(Error::model_not_trained(format!(
                        "artifact token index {idx} for class {class} outside vocabulary of size {vocab_size}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Total token occurrences per class (the likelihood denominator)
    pub fn token_totals(&self) -> BTreeMap<PriorityClass, u64> {
        PriorityClass::ALL
            .iter()
            .map(|&class| {
                let total = self
                    .class_token_counts
                    .get(&class)
                    .map(|counts| counts.values().sum())
                    .unwrap_or(0);
                (class, total)
            })
            .collect()
    }
}
