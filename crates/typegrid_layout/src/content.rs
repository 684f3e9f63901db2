//! Content carried by content cells

use std::fmt;
use std::str::FromStr;

use typegrid_core::ImageHandle;

use crate::typography::TextCellStyle;

/// Discriminant of [`CellContent`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentType {
    #[default]
    Empty,
    Text,
    Image,
    Mask,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Empty => "empty",
            ContentType::Text => "text",
            ContentType::Image => "image",
            ContentType::Mask => "mask",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(ContentType::Empty),
            "text" => Ok(ContentType::Text),
            "image" => Ok(ContentType::Image),
            "mask" => Ok(ContentType::Mask),
            other => Err(format!("unknown content type: {other}")),
        }
    }
}

/// Horizontal placement of an image inside its cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAnchor {
    Left,
    #[default]
    Center,
    Right,
}

impl HorizontalAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            HorizontalAnchor::Left => "left",
            HorizontalAnchor::Center => "center",
            HorizontalAnchor::Right => "right",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(HorizontalAnchor::Left),
            "center" => Some(HorizontalAnchor::Center),
            "right" => Some(HorizontalAnchor::Right),
            _ => None,
        }
    }
}

/// Vertical placement of an image inside its cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VerticalAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            VerticalAnchor::Top => "top",
            VerticalAnchor::Middle => "middle",
            VerticalAnchor::Bottom => "bottom",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "top" => Some(VerticalAnchor::Top),
            "middle" => Some(VerticalAnchor::Middle),
            "bottom" => Some(VerticalAnchor::Bottom),
            _ => None,
        }
    }
}

/// Secondary text placed in a content cell
#[derive(Clone, Debug, PartialEq)]
pub struct TextContent {
    pub text: String,
    pub style: TextCellStyle,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextCellStyle::new(24.0),
        }
    }

    pub fn with_style(mut self, style: TextCellStyle) -> Self {
        self.style = style;
        self
    }
}

/// A decoded image fitted into a content cell
#[derive(Clone, Debug, PartialEq)]
pub struct ImageContent {
    pub image: ImageHandle,
    /// Multiplier applied after the contain fit
    pub scale: f32,
    /// Clockwise rotation in degrees around the image center
    pub rotation: f32,
    /// Inset from the cell edges, in pixels
    pub padding: f32,
    pub h_anchor: HorizontalAnchor,
    pub v_anchor: VerticalAnchor,
}

impl ImageContent {
    pub fn new(image: ImageHandle) -> Self {
        Self {
            image,
            scale: 1.0,
            rotation: 0.0,
            padding: 0.0,
            h_anchor: HorizontalAnchor::Center,
            v_anchor: VerticalAnchor::Middle,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_anchor(mut self, h_anchor: HorizontalAnchor, v_anchor: VerticalAnchor) -> Self {
        self.h_anchor = h_anchor;
        self.v_anchor = v_anchor;
        self
    }
}

/// Window onto the shared background image
#[derive(Clone, Debug, PartialEq)]
pub struct MaskContent {
    pub opacity: f32,
    pub padding: f32,
}

impl Default for MaskContent {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            padding: 0.0,
        }
    }
}

impl MaskContent {
    pub fn new(opacity: f32) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }
}

/// What a content cell displays
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellContent {
    #[default]
    Empty,
    Text(TextContent),
    Image(ImageContent),
    Mask(MaskContent),
}

impl CellContent {
    pub fn content_type(&self) -> ContentType {
        match self {
            CellContent::Empty => ContentType::Empty,
            CellContent::Text(_) => ContentType::Text,
            CellContent::Image(_) => ContentType::Image,
            CellContent::Mask(_) => ContentType::Mask,
        }
    }

    /// Inset applied before drawing the content
    pub fn padding(&self) -> f32 {
        match self {
            CellContent::Image(image) => image.padding,
            CellContent::Mask(mask) => mask.padding,
            CellContent::Empty | CellContent::Text(_) => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegrid_core::ImageId;

    #[test]
    fn test_content_type_discriminant() {
        let image = ImageHandle::new(ImageId(1), 10.0, 10.0);
        assert_eq!(CellContent::Empty.content_type(), ContentType::Empty);
        assert_eq!(
            CellContent::Text(TextContent::new("hi")).content_type(),
            ContentType::Text
        );
        assert_eq!(
            CellContent::Image(ImageContent::new(image)).content_type(),
            ContentType::Image
        );
        assert_eq!(
            CellContent::Mask(MaskContent::default()).content_type(),
            ContentType::Mask
        );
    }

    #[test]
    fn test_content_type_parse() {
        for kind in [
            ContentType::Empty,
            ContentType::Text,
            ContentType::Image,
            ContentType::Mask,
        ] {
            assert_eq!(kind.as_str().parse::<ContentType>(), Ok(kind));
        }
        assert!("video".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_padding_by_variant() {
        let image = ImageHandle::new(ImageId(1), 10.0, 10.0);
        assert_eq!(
            CellContent::Image(ImageContent::new(image).with_padding(6.0)).padding(),
            6.0
        );
        assert_eq!(
            CellContent::Mask(MaskContent::new(0.5).with_padding(4.0)).padding(),
            4.0
        );
        assert_eq!(CellContent::Empty.padding(), 0.0);
    }

    #[test]
    fn test_mask_opacity_clamped() {
        assert_eq!(MaskContent::new(3.0).opacity, 1.0);
        assert_eq!(MaskContent::new(-1.0).opacity, 0.0);
    }
}
