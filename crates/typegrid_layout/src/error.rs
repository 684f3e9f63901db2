//! Error types for typegrid_layout

use thiserror::Error;

use crate::snapshot::SnapshotIssue;

/// Errors raised when grid state crosses a format boundary
#[derive(Error, Debug)]
pub enum GridError {
    /// Snapshot failed validation; nothing was restored
    #[error("invalid snapshot: {} issue(s), first: {}", .0.len(), first_issue(.0))]
    InvalidSnapshot(Vec<SnapshotIssue>),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be parsed or written
    #[error("config error: {0}")]
    Config(String),

    /// Config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialized cell could not be turned back into a cell
    #[error("invalid cell data for {content_id}: {reason}")]
    InvalidCellData { content_id: String, reason: String },
}

impl GridError {
    pub(crate) fn cell_data(content_id: &str, reason: impl Into<String>) -> Self {
        GridError::InvalidCellData {
            content_id: content_id.to_string(),
            reason: reason.into(),
        }
    }
}

fn first_issue(issues: &[SnapshotIssue]) -> String {
    issues
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

/// Result type for typegrid_layout operations
pub type Result<T> = std::result::Result<T, GridError>;
