//! Triage Classifiers
//!
//! Incident priority classification for dispatcher triage.
//!
//! A multinomial Naive Bayes text classifier (trained offline from historical
//! incident titles/descriptions) combined with a rule-based domain boost layer
//! for known high-severity phrasings, normalized with softmax into a
//! confidence score. The model artifact is loaded lazily on first request and
//! immutable afterwards; feedback records are appended best-effort for future
//! retraining.

pub mod classifier;
pub mod config;
pub mod feedback;
pub mod model;
pub mod rules;
pub mod tokenizer;
pub mod train;

pub use classifier::{ClassificationResult, PriorityClassifier};
pub use config::ClassifierConfig;
pub use feedback::{FeedbackSink, JsonlFeedbackSink};
pub use model::{PriorityModel, DEFAULT_SMOOTHING, SCHEMA_VERSION};
pub use rules::DomainBoost;
pub use tokenizer::tokenize;
pub use train::train;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, PriorityClassifier};
    pub use crate::config::ClassifierConfig;
    pub use crate::feedback::{FeedbackSink, JsonlFeedbackSink};
    pub use crate::model::PriorityModel;
    pub use crate::train::train;
    pub use triage_core::prelude::*;
}
