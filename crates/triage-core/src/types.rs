//! Core types for incident triage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal incident severity level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorityClass {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityClass {
    /// All classes in ascending severity order
    pub const ALL: [PriorityClass; 4] = [
        PriorityClass::Low,
        PriorityClass::Medium,
        PriorityClass::High,
        PriorityClass::Critical,
    ];

    /// Get the canonical label for this class
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Parse a label, case-insensitively. Returns `None` for unrecognized labels.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single labeled example extracted from historical incident records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Concatenated title and description, English free text
    pub text: String,

    /// Severity label assigned by a dispatcher
    pub label: PriorityClass,
}

impl TrainingExample {
    /// Create a new training example
    pub fn new(text: impl Into<String>, label: PriorityClass) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// What the dispatcher did with a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    /// Suggestion was accepted as-is
    Accept,
    /// Suggestion was replaced with a different class
    Override,
}

/// A single accept/override decision, appended to the feedback log
/// for future offline retraining. Write-only from this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// When the decision was made
    pub timestamp: DateTime<Utc>,

    /// Accept or override
    pub action: FeedbackAction,

    /// The class the classifier suggested
    pub suggested_class: PriorityClass,

    /// The class the dispatcher settled on
    pub final_class: PriorityClass,
}

impl FeedbackRecord {
    /// Create a record timestamped now
    pub fn new(
        action: FeedbackAction,
        suggested_class: PriorityClass,
        final_class: PriorityClass,
    ) -> Self {
        Self::at(Utc::now(), action, suggested_class, final_class)
    }

    /// Create a record with an explicit timestamp
    pub fn at(
        timestamp: DateTime<Utc>,
        action: FeedbackAction,
        suggested_class: PriorityClass,
        final_class: PriorityClass,
    ) -> Self {
        Self {
            timestamp,
            action,
            suggested_class,
            final_class,
        }
    }
}
