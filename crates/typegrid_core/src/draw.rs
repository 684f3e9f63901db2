//! Draw Context - canvas rendering API
//!
//! The `DrawContext` trait is the only way renderers talk to a canvas. A host
//! backend (2D canvas, GPU batcher, PDF writer) implements it; the cell
//! renderers never see anything else.
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     ctx.push_transform(Transform::translate(10.0, 20.0));
//!     ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::BLUE);
//!     ctx.draw_text("Hello", Point::new(10.0, 30.0), &TextStyle::default());
//!     ctx.pop_transform();
//! }
//! ```
//!
//! [`RecordingContext`] records every call as a [`DrawCommand`], which is how
//! the rest of the workspace tests its drawing code.

use crate::geometry::{Point, Rect, Size, Transform};
use crate::visual::Color;

// ─────────────────────────────────────────────────────────────────────────────
// Text Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Horizontal text alignment relative to the draw origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchor of the draw origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
    Black,
}

impl FontWeight {
    /// CSS numeric weight
    pub fn to_numeric(self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
            FontWeight::Black => 900,
        }
    }

    /// Nearest named weight for a CSS numeric weight
    pub fn from_numeric(weight: u16) -> Self {
        match weight {
            0..=199 => FontWeight::Thin,
            200..=349 => FontWeight::Light,
            350..=449 => FontWeight::Regular,
            450..=599 => FontWeight::Medium,
            600..=799 => FontWeight::Bold,
            _ => FontWeight::Black,
        }
    }
}

/// Text style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font family name
    pub family: String,
    /// Font size in pixels
    pub size: f32,
    /// Font weight
    pub weight: FontWeight,
    /// Italic face
    pub italic: bool,
    /// Text color
    pub color: Color,
    /// Text alignment
    pub align: TextAlign,
    /// Text baseline
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 16.0,
            weight: FontWeight::Regular,
            italic: false,
            color: Color::BLACK,
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
        }
    }
}

impl TextStyle {
    /// Create a new text style with font size
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Set text color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set font weight
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set font family
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Set alignment
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Image Types
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to an image decoded by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

/// A ready-to-draw image: host handle plus natural pixel dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageHandle {
    pub id: ImageId,
    pub width: f32,
    pub height: f32,
}

impl ImageHandle {
    pub fn new(id: ImageId, width: f32, height: f32) -> Self {
        Self { id, width, height }
    }

    /// Natural size of the image
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// An image with no area cannot be fitted into anything
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Image rendering options
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOptions {
    /// Opacity (1.0 = fully opaque)
    pub opacity: f32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageOptions {
    pub fn new() -> Self {
        Self { opacity: 1.0 }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The canvas drawing interface
///
/// Transform and clip state is stack based; every `push_*` must be matched
/// with the corresponding `pop_*`.
pub trait DrawContext {
    /// Push a transform onto the stack (multiplied with current)
    fn push_transform(&mut self, transform: Transform);

    /// Pop the top transform from the stack
    fn pop_transform(&mut self);

    /// Clip everything drawn until the matching `pop_clip` to `rect`
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline `rect` with a line `width` pixels wide
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Draw a single line of text anchored at `origin` per the style's align/baseline
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);

    /// Draw an image stretched into `rect`
    fn draw_image(&mut self, image: ImageId, rect: Rect, options: &ImageOptions);

    fn viewport_size(&self) -> Size;
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushTransform(Transform),
    PopTransform,
    PushClip(Rect),
    PopClip,

    // 2D Drawing
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        width: f32,
        color: Color,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    DrawText {
        text: String,
        origin: Point,
        style: TextStyle,
    },
    DrawImage {
        image: ImageId,
        rect: Rect,
        options: ImageOptions,
    },
}

/// A draw context that records commands for later execution
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Transform>,
    clip_depth: usize,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![Transform::IDENTITY],
            clip_depth: 0,
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Combined transform of everything currently pushed
    pub fn current_transform(&self) -> Transform {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or(Transform::IDENTITY)
    }

    /// Number of clips currently pushed
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// True when every push has been matched by a pop
    pub fn is_balanced(&self) -> bool {
        self.clip_depth == 0 && self.transform_stack.len() == 1
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Transform) {
        let combined = self.current_transform().then(&transform);
        self.transform_stack.push(combined);
        self.commands.push(DrawCommand::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        } else {
            tracing::trace!("pop_transform past the root transform");
        }
        self.commands.push(DrawCommand::PopTransform);
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopClip);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { rect, width, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            origin,
            style: style.clone(),
        });
    }

    fn draw_image(&mut self, image: ImageId, rect: Rect, options: &ImageOptions) {
        self.commands.push(DrawCommand::DrawImage {
            image,
            rect,
            options: options.clone(),
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}
