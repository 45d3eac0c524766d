//! Triage Core
//!
//! Core types and error handling shared across incident triage components.
//!
//! This crate provides:
//! - The four ordinal priority classes and label parsing
//! - Training example and feedback record types
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{FeedbackAction, FeedbackRecord, PriorityClass, TrainingExample};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{FeedbackAction, FeedbackRecord, PriorityClass, TrainingExample};
}
