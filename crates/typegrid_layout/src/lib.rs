//! typegrid Layout
//!
//! Turns a canvas and the bounds of its rendered text lines into a grid of
//! cells around the text.
//!
//! # Features
//!
//! - **Detection**: one pass over the text lines yields a text cell per line,
//!   content cells to the left and right, and remainders above and below
//! - **Cells**: main-text cells keyed by content, content cells carrying
//!   text, images, or masks, each with an optional animation
//! - **Layers**: ordered, toggleable groups that decide draw order
//! - **Snapshots**: JSON capture and validated restore of the whole grid
//! - **Config**: detection settings loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use typegrid_core::{Padding, Size};
//! use typegrid_layout::{Grid, GridDetector, TextLineBounds};
//!
//! let lines = vec![TextLineBounds::new(300.0, 100.0, 200.0, 60.0, "HELLO")];
//! let mut detector = GridDetector::default();
//! let detection = detector.detect(Size::new(800.0, 600.0), &lines, Padding::uniform(20.0));
//! let grid = Grid::from_detection(detection);
//! assert_eq!(grid.cols(), 3);
//! ```

pub mod builder;
pub mod cell;
pub mod config;
pub mod content;
pub mod detector;
pub mod error;
pub mod grid;
pub mod identity;
pub mod layers;
pub mod matrix;
pub mod snapshot;
pub mod text_measure;
pub mod typography;

pub use cell::{Cell, CellKind, CellType, ContentCell, MainTextCell};
pub use config::GridConfig;
pub use content::{
    CellContent, ContentType, HorizontalAnchor, ImageContent, MaskContent, TextContent,
    VerticalAnchor,
};
pub use detector::{Detection, GridDetector, TextLineBounds};
pub use error::{GridError, Result};
pub use grid::Grid;
pub use identity::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use layers::{
    Layer, LayerManager, ABOVE_MAIN_TEXT_LAYER, BACKGROUND_LAYER, BEHIND_MAIN_TEXT_LAYER,
    MAIN_TEXT_LAYER,
};
pub use matrix::CellMatrix;
pub use snapshot::{CellData, GridSnapshot, SnapshotIssue};
pub use text_measure::{EstimatedTextMeasurer, TextMeasurer, TextMetrics};
pub use typography::TextCellStyle;
