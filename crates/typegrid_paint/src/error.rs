//! Render error types

use thiserror::Error;
use typegrid_core::Rect;

/// A cell that cannot be drawn
///
/// Raised before anything is drawn for the cell, so a failed cell never
/// leaves clip or opacity state behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("cell {content_id} has unusable bounds {bounds:?}")]
    InvalidBounds { content_id: String, bounds: Rect },

    #[error("cell {content_id} has an image without a drawable size ({width}x{height})")]
    InvalidImage {
        content_id: String,
        width: f32,
        height: f32,
    },
}

/// Result type for render operations
pub type Result<T> = std::result::Result<T, RenderError>;
