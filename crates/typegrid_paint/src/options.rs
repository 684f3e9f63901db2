//! Render options
//!
//! The serializable part of [`RenderOptions`] is what hosts keep in presets.
//! The background image and canvas size belong to the running session and
//! are never written out.

use serde::{Deserialize, Serialize};
use typegrid_core::{ImageHandle, Size};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Stroke every cell's effective bounds
    pub show_outlines: bool,
    /// Draw each cell's `id` in its top-left corner
    pub show_numbers: bool,
    /// Outline stroke width in pixels
    pub outline_width: f32,
    /// Font size of cell numbers
    pub number_size: f32,
    /// Image revealed through mask cells
    #[serde(skip)]
    pub background_image: Option<ImageHandle>,
    /// Size the background image is stretched to; zero means the viewport
    #[serde(skip)]
    pub canvas_size: Size,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_outlines: false,
            show_numbers: false,
            outline_width: 1.0,
            number_size: 12.0,
            background_image: None,
            canvas_size: Size::ZERO,
        }
    }
}

impl RenderOptions {
    pub fn new(canvas_size: Size) -> Self {
        Self {
            canvas_size,
            ..Default::default()
        }
    }

    pub fn with_outlines(mut self, show: bool) -> Self {
        self.show_outlines = show;
        self
    }

    pub fn with_numbers(mut self, show: bool) -> Self {
        self.show_numbers = show;
        self
    }

    pub fn with_background_image(mut self, image: ImageHandle) -> Self {
        self.background_image = Some(image);
        self
    }

    /// Configured canvas size, or `viewport` when none was set
    pub fn canvas_or(&self, viewport: Size) -> Size {
        if self.canvas_size.width > 0.0 && self.canvas_size.height > 0.0 {
            self.canvas_size
        } else {
            viewport
        }
    }

    /// Load a preset; session-only fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
