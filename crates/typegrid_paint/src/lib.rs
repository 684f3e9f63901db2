//! typegrid Paint
//!
//! Draws a [`Grid`](typegrid_layout::Grid) onto any
//! [`DrawContext`](typegrid_core::DrawContext).
//!
//! # Features
//!
//! - **CellRenderer**: stateless per-cell routines for text, images, masks,
//!   and empty cells, plus debug outlines and numbers
//! - **Placement**: contain fit, scale, rotation, and anchoring for images
//! - **GridPainter**: layer-ordered frame painting where one bad cell never
//!   stops the frame
//!
//! # Example
//!
//! ```rust
//! use typegrid_core::{Padding, RecordingContext, Size};
//! use typegrid_layout::{Grid, GridDetector, TextLineBounds};
//! use typegrid_paint::{GridPainter, RenderOptions};
//!
//! let canvas = Size::new(800.0, 600.0);
//! let lines = vec![TextLineBounds::new(300.0, 100.0, 200.0, 60.0, "HELLO")];
//! let grid = Grid::from_detection(GridDetector::default().detect(canvas, &lines, Padding::ZERO));
//!
//! let painter = GridPainter::new(RenderOptions::new(canvas).with_outlines(true));
//! let mut ctx = RecordingContext::new(canvas);
//! let report = painter.paint(&mut ctx, &grid);
//! assert!(report.is_clean());
//! ```

pub mod error;
pub mod options;
pub mod painter;
pub mod placement;
pub mod renderer;

pub use error::{RenderError, Result};
pub use options::RenderOptions;
pub use painter::{GridPainter, PaintReport};
pub use placement::{place_image, ImagePlacement};
pub use renderer::CellRenderer;
