//! Text measurement
//!
//! Renderers need the width of a drawn line to size underlines and
//! highlights. Hosts with a real font stack implement [`TextMeasurer`];
//! everything else falls back to [`EstimatedTextMeasurer`].

use typegrid_core::{FontWeight, TextStyle};

/// Text measurement result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width in pixels
    pub width: f32,
    /// Line height in pixels
    pub height: f32,
    /// Distance from baseline to top
    pub ascender: f32,
    /// Distance from baseline to bottom (negative)
    pub descender: f32,
}

/// Trait for measuring a single line of text
pub trait TextMeasurer {
    /// Measure `text` as it would be drawn with `style`
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Advance width only
    fn width(&self, text: &str, style: &TextStyle) -> f32 {
        self.measure(text, style).width
    }
}

/// A text measurer that uses per-character estimates
#[derive(Debug, Clone, Copy)]
pub struct EstimatedTextMeasurer {
    /// Average glyph advance as a fraction of font size
    pub char_width_ratio: f32,
    /// Line height multiplier
    pub line_height: f32,
}

impl Default for EstimatedTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.55,
            line_height: 1.2,
        }
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_count = text.chars().count() as f32;

        // Heavier faces run wider
        let weight_factor = match style.weight {
            FontWeight::Bold | FontWeight::Black => 1.08,
            _ => 1.0,
        };

        TextMetrics {
            width: char_count * style.size * self.char_width_ratio * weight_factor,
            height: style.size * self.line_height,
            ascender: style.size * 0.8,
            descender: style.size * -0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_scales_with_length_and_size() {
        let measurer = EstimatedTextMeasurer::default();
        let style = TextStyle::new(20.0);

        let short = measurer.width("ab", &style);
        let long = measurer.width("abcd", &style);
        assert!((long - 2.0 * short).abs() < 1e-4);

        let big = measurer.width("ab", &TextStyle::new(40.0));
        assert!((big - 2.0 * short).abs() < 1e-4);
    }

    #[test]
    fn test_empty_text_has_no_width() {
        let measurer = EstimatedTextMeasurer::default();
        let metrics = measurer.measure("", &TextStyle::new(16.0));
        assert_eq!(metrics.width, 0.0);
        assert!(metrics.height > 0.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let measurer = EstimatedTextMeasurer::default();
        let regular = TextStyle::new(16.0);
        let bold = TextStyle::new(16.0).with_weight(FontWeight::Bold);
        assert!(measurer.width("HELLO", &bold) > measurer.width("HELLO", &regular));
    }
}
