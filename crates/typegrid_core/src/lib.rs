//! typegrid Core
//!
//! Foundational types shared by every typegrid crate:
//!
//! - **Geometry**: `Point`, `Size`, `Rect`, `Vec2`, `Padding`, `Transform`
//! - **Color**: RGBA colors
//! - **Draw Context**: the canvas API renderers draw through, plus a
//!   recording implementation used for testing and deferred playback
//!
//! # Example
//!
//! ```rust
//! use typegrid_core::{Color, DrawContext, Rect, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));
//! ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::BLUE);
//! assert_eq!(ctx.commands().len(), 1);
//! ```

pub mod draw;
pub mod geometry;
pub mod visual;

pub use draw::{
    DrawCommand, DrawContext, FontWeight, ImageHandle, ImageId, ImageOptions, RecordingContext,
    TextAlign, TextBaseline, TextStyle,
};
pub use geometry::{Padding, Point, Rect, Size, Transform, Vec2};
pub use visual::Color;
