//! Image placement geometry
//!
//! Pure functions; the renderer turns an [`ImagePlacement`] into draw calls.

use typegrid_core::{Point, Rect, Size};
use typegrid_layout::{HorizontalAnchor, ImageContent, VerticalAnchor};

/// Where an image lands inside its content rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImagePlacement {
    /// Unrotated image rectangle, centered on the rotation center
    pub image_rect: Rect,
    /// Rotation in radians about `image_rect`'s center
    pub rotation: f32,
    /// Axis-aligned box around the rotated image, anchored in the content rect
    pub extent: Rect,
}

/// `bounds` inset by `padding` on every side, never negative
pub fn content_rect(bounds: Rect, padding: f32) -> Rect {
    let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
    bounds.inset(padding, padding)
}

/// Largest size with `natural`'s aspect ratio that fits inside `target`
pub fn contain_size(natural: Size, target: Size) -> Size {
    if natural.width <= 0.0 || natural.height <= 0.0 {
        return Size::ZERO;
    }
    let ratio = (target.width / natural.width).min(target.height / natural.height);
    Size::new(natural.width * ratio, natural.height * ratio)
}

/// Bounding box of a `size` rectangle rotated by `degrees`
pub fn rotated_extent(size: Size, degrees: f32) -> Size {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Size::new(
        size.width * cos.abs() + size.height * sin.abs(),
        size.width * sin.abs() + size.height * cos.abs(),
    )
}

/// Position a box of `size` inside `within`
pub fn anchor(size: Size, within: Rect, h: HorizontalAnchor, v: VerticalAnchor) -> Rect {
    let x = match h {
        HorizontalAnchor::Left => within.x(),
        HorizontalAnchor::Center => within.x() + (within.width() - size.width) / 2.0,
        HorizontalAnchor::Right => within.right() - size.width,
    };
    let y = match v {
        VerticalAnchor::Top => within.y(),
        VerticalAnchor::Middle => within.y() + (within.height() - size.height) / 2.0,
        VerticalAnchor::Bottom => within.bottom() - size.height,
    };
    Rect::new(x, y, size.width, size.height)
}

/// Contain-fit, scale, rotate, then anchor `image` inside `rect`
///
/// A negative or non-finite scale is treated as 0 and a non-finite rotation
/// as none.
pub fn place_image(image: &ImageContent, rect: Rect) -> ImagePlacement {
    let scale = if image.scale.is_finite() { image.scale.max(0.0) } else { 0.0 };
    let degrees = if image.rotation.is_finite() { image.rotation } else { 0.0 };

    let fitted = contain_size(image.image.size(), rect.size());
    let scaled = Size::new(fitted.width * scale, fitted.height * scale);
    let extent = anchor(
        rotated_extent(scaled, degrees),
        rect,
        image.h_anchor,
        image.v_anchor,
    );

    ImagePlacement {
        image_rect: Rect::from_center(extent.center(), scaled),
        rotation: degrees.to_radians(),
        extent,
    }
}

impl ImagePlacement {
    pub fn center(&self) -> Point {
        self.image_rect.center()
    }
}
