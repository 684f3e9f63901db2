//! Per-cell typography
//!
//! Every text-bearing cell owns a [`TextCellStyle`]. The style is plain data;
//! [`TextCellStyle::to_text_style`] converts it into the draw-level
//! [`TextStyle`] renderers hand to a `DrawContext`.
//!
//! ```ignore
//! let style = TextCellStyle::new(72.0)
//!     .with_weight(FontWeight::Black)
//!     .with_underline(true)
//!     .with_highlight(Color::YELLOW.with_alpha(0.4));
//! ```

use typegrid_core::{Color, FontWeight, TextAlign, TextBaseline, TextStyle};

/// Default font size for main text, in pixels
pub const DEFAULT_FONT_SIZE: f32 = 64.0;

/// Default font family
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Typography owned by a single text cell
#[derive(Clone, Debug, PartialEq)]
pub struct TextCellStyle {
    pub font_size: f32,
    pub font_family: String,
    pub color: Color,
    pub align: TextAlign,
    pub weight: FontWeight,
    pub italic: bool,
    pub underline: bool,
    /// Draw a filled rectangle behind the text
    pub highlight: bool,
    pub highlight_color: Color,
}

impl Default for TextCellStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: Color::BLACK,
            align: TextAlign::Center,
            weight: FontWeight::Bold,
            italic: false,
            underline: false,
            highlight: false,
            highlight_color: Color::rgba(1.0, 1.0, 0.0, 0.4),
        }
    }
}

impl TextCellStyle {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            ..Default::default()
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Enable the highlight box with the given color
    pub fn with_highlight(mut self, color: Color) -> Self {
        self.highlight = true;
        self.highlight_color = color;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight.to_numeric() >= FontWeight::Bold.to_numeric()
    }

    /// Draw-level style, vertically centered on the origin
    pub fn to_text_style(&self) -> TextStyle {
        TextStyle {
            family: self.font_family.clone(),
            size: self.font_size,
            weight: self.weight,
            italic: self.italic,
            color: self.color,
            align: self.align,
            baseline: TextBaseline::Middle,
        }
    }
}
