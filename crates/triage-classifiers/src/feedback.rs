//! Feedback sink
//!
//! Durably records accept/override decisions for future offline retraining.
//! Fire-and-forget from the caller's perspective: a feedback write failure
//! must never block or fail the primary action, so errors are swallowed and
//! logged as warnings.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::warn;
use triage_core::{FeedbackRecord, Result};

/// Sink for accept/override feedback records
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Record a decision. Best-effort; never fails the caller.
    async fn record(&self, record: &FeedbackRecord);
}

/// Append-only JSON-lines feedback log on the local filesystem
pub struct JsonlFeedbackSink {
    path: PathBuf,
}

impl JsonlFeedbackSink {
    /// Create a sink appending to the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn append(&self, record: &FeedbackRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(json.as_bytes()).await?;
        file.write_all(b"\n").await?;
        Ok(())
    }
}

#[async_trait]
impl FeedbackSink for JsonlFeedbackSink {
    async fn record(&self, record: &FeedbackRecord) {
        if let Err(e) = self.append(record).await {
            warn!(
                error = %e,
                path = %self.path.display(),
                "failed to append feedback record"
            );
        }
    }
}
