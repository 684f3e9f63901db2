//! Per-cell draw routines
//!
//! [`CellRenderer`] knows how to put one cell on a [`DrawContext`]. It holds
//! no grid state: layout is done, bounds are final, and the only inputs are
//! the cell, its animated offset, and [`RenderOptions`].

use typegrid_core::{
    Color, DrawContext, ImageOptions, Point, Rect, TextAlign, TextBaseline, TextStyle, Transform,
};
use typegrid_layout::{
    Cell, CellContent, CellKind, ContentCell, EstimatedTextMeasurer, ImageContent, MaskContent,
    TextCellStyle, TextMeasurer,
};

use crate::error::{RenderError, Result};
use crate::options::RenderOptions;
use crate::placement::{content_rect, place_image};

/// Outline of main-text cells
pub const TEXT_OUTLINE_COLOR: Color = Color::rgba(0.9, 0.2, 0.2, 0.9);
/// Outline of content cells
pub const CONTENT_OUTLINE_COLOR: Color = Color::rgba(0.2, 0.4, 0.9, 0.9);
/// Cell number label
pub const NUMBER_COLOR: Color = Color::rgba(0.1, 0.1, 0.1, 0.8);
/// Mask cell without a background image
pub const MASK_PLACEHOLDER_COLOR: Color = Color::rgba(0.5, 0.5, 0.5, 0.25);
/// Icon drawn on the mask placeholder
pub const MASK_ICON_COLOR: Color = Color::rgba(0.3, 0.3, 0.3, 0.6);

/// Highlight height as a multiple of font size
const HIGHLIGHT_HEIGHT: f32 = 1.2;
/// Underline position below the middle line, as a fraction of font size
const UNDERLINE_OFFSET: f32 = 0.4;
const NUMBER_INSET: f32 = 4.0;

/// Draws single cells
pub struct CellRenderer {
    measurer: Box<dyn TextMeasurer>,
}

impl Default for CellRenderer {
    fn default() -> Self {
        Self::new(EstimatedTextMeasurer::default())
    }
}

impl std::fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellRenderer").finish_non_exhaustive()
    }
}

impl CellRenderer {
    pub fn new(measurer: impl TextMeasurer + 'static) -> Self {
        Self {
            measurer: Box::new(measurer),
        }
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    /// Draw `cell` at its effective bounds
    ///
    /// Everything that can fail is checked before the first draw call, so an
    /// error leaves `ctx` untouched.
    pub fn render_cell(
        &self,
        ctx: &mut dyn DrawContext,
        cell: &Cell,
        options: &RenderOptions,
    ) -> Result<()> {
        let bounds = cell.effective_bounds();
        validate(cell, bounds)?;

        match &cell.kind {
            CellKind::MainText(text) => self.draw_text(ctx, &text.text, &text.style, bounds),
            CellKind::Content(content) => self.draw_content(ctx, content, bounds, options),
        }

        if options.show_outlines {
            let color = if cell.is_main_text() {
                TEXT_OUTLINE_COLOR
            } else {
                CONTENT_OUTLINE_COLOR
            };
            ctx.stroke_rect(bounds, options.outline_width, color);
        }

        if options.show_numbers {
            let style = TextStyle {
                baseline: TextBaseline::Top,
                ..TextStyle::new(options.number_size).with_color(NUMBER_COLOR)
            };
            ctx.draw_text(
                &cell.id.to_string(),
                Point::new(bounds.x() + NUMBER_INSET, bounds.y() + NUMBER_INSET),
                &style,
            );
        }

        Ok(())
    }

    /// One line of styled text inside `rect`
    ///
    /// The anchor follows alignment horizontally and sits on the vertical
    /// middle. Draw order is highlight, text, underline.
    pub fn draw_text(&self, ctx: &mut dyn DrawContext, text: &str, style: &TextCellStyle, rect: Rect) {
        if text.trim().is_empty() {
            return;
        }

        let text_style = style.to_text_style();
        let width = self.measurer.width(text, &text_style);
        let anchor_x = match style.align {
            TextAlign::Left => rect.x(),
            TextAlign::Center => rect.center().x,
            TextAlign::Right => rect.right(),
        };
        let start_x = match style.align {
            TextAlign::Left => anchor_x,
            TextAlign::Center => anchor_x - width / 2.0,
            TextAlign::Right => anchor_x - width,
        };
        let middle = rect.center().y;

        if style.highlight && !style.highlight_color.is_transparent() {
            let height = style.font_size * HIGHLIGHT_HEIGHT;
            ctx.fill_rect(
                Rect::new(start_x, middle - height / 2.0, width, height),
                style.highlight_color,
            );
        }

        ctx.draw_text(text, Point::new(anchor_x, middle), &text_style);

        if style.underline {
            let thickness = (style.font_size / 16.0).max(1.0);
            ctx.fill_rect(
                Rect::new(start_x, middle + style.font_size * UNDERLINE_OFFSET, width, thickness),
                style.color,
            );
        }
    }

    fn draw_content(
        &self,
        ctx: &mut dyn DrawContext,
        cell: &ContentCell,
        bounds: Rect,
        options: &RenderOptions,
    ) {
        match &cell.content {
            CellContent::Text(text) if !text.text.trim().is_empty() => {
                self.draw_text(ctx, &text.text, &text.style, bounds)
            }
            // Blank text paints like an empty cell
            CellContent::Empty | CellContent::Text(_) => {
                if !cell.fill_color.is_transparent() {
                    ctx.fill_rect(bounds, cell.fill_color);
                }
            }
            CellContent::Image(image) => draw_image(ctx, image, bounds),
            CellContent::Mask(mask) => draw_mask(ctx, mask, bounds, options),
        }
    }
}

fn validate(cell: &Cell, bounds: Rect) -> Result<()> {
    if !bounds.is_finite() || bounds.width() < 0.0 || bounds.height() < 0.0 {
        return Err(RenderError::InvalidBounds {
            content_id: cell.content_id().to_string(),
            bounds,
        });
    }

    if let Some(CellContent::Image(image)) = cell.as_content().map(|c| &c.content) {
        if !image.image.is_drawable() {
            return Err(RenderError::InvalidImage {
                content_id: cell.content_id().to_string(),
                width: image.image.width,
                height: image.image.height,
            });
        }
    }

    Ok(())
}

fn draw_image(ctx: &mut dyn DrawContext, image: &ImageContent, bounds: Rect) {
    let rect = content_rect(bounds, image.padding);
    if !rect.has_area() {
        return;
    }

    let placement = place_image(image, rect);
    if !placement.image_rect.has_area() {
        return;
    }

    ctx.push_clip(rect);
    let rotated = placement.rotation != 0.0;
    if rotated {
        let center = placement.center();
        ctx.push_transform(Transform::rotate_centered(placement.rotation, center.x, center.y));
    }
    ctx.draw_image(image.image.id, placement.image_rect, &ImageOptions::new());
    if rotated {
        ctx.pop_transform();
    }
    ctx.pop_clip();
}

fn draw_mask(ctx: &mut dyn DrawContext, mask: &MaskContent, bounds: Rect, options: &RenderOptions) {
    let rect = content_rect(bounds, mask.padding);
    if !rect.has_area() {
        return;
    }

    ctx.push_clip(rect);
    match options.background_image.filter(|image| image.is_drawable()) {
        Some(image) => {
            let canvas = options.canvas_or(ctx.viewport_size());
            ctx.draw_image(
                image.id,
                canvas.to_rect(),
                &ImageOptions::new().with_opacity(mask.opacity),
            );
        }
        None => {
            ctx.fill_rect(rect, MASK_PLACEHOLDER_COLOR);
            let radius = rect.width().min(rect.height()) * 0.15;
            ctx.fill_circle(rect.center(), radius, MASK_ICON_COLOR);
        }
    }
    ctx.pop_clip();
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegrid_core::{DrawCommand, ImageHandle, ImageId, RecordingContext, Size};
    use typegrid_layout::TextContent;

    fn ctx() -> RecordingContext {
        RecordingContext::new(Size::new(800.0, 600.0))
    }

    fn text_cell(style: TextCellStyle) -> Cell {
        Cell::main_text(0, 1, Rect::new(100.0, 100.0, 400.0, 80.0), "HELLO", 0, style)
    }

    fn content_cell(content: CellContent) -> Cell {
        let mut cell = Cell::content(0, 0, Rect::new(0.0, 0.0, 200.0, 100.0), "c-1");
        cell.set_content(content);
        cell
    }

    fn texts(commands: &[DrawCommand]) -> Vec<(String, Point)> {
        commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::DrawText { text, origin, .. } => Some((text.clone(), *origin)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_text_anchor_follows_alignment() {
        let renderer = CellRenderer::default();
        let cases = [
            (TextAlign::Left, 100.0),
            (TextAlign::Center, 300.0),
            (TextAlign::Right, 500.0),
        ];
        for (align, x) in cases {
            let mut ctx = ctx();
            let cell = text_cell(TextCellStyle::default().with_align(align));
            renderer.render_cell(&mut ctx, &cell, &RenderOptions::default()).unwrap();
            assert_eq!(texts(ctx.commands()), vec![("HELLO".to_string(), Point::new(x, 140.0))]);
        }
    }

    #[test]
    fn test_highlight_text_underline_order() {
        let renderer = CellRenderer::default();
        let style = TextCellStyle::new(40.0)
            .with_align(TextAlign::Left)
            .with_underline(true)
            .with_highlight(Color::YELLOW);
        let mut ctx = ctx();
        renderer
            .render_cell(&mut ctx, &text_cell(style.clone()), &RenderOptions::default())
            .unwrap();

        let width = renderer.measurer().width("HELLO", &style.to_text_style());
        match ctx.commands() {
            [DrawCommand::FillRect { rect: highlight, color, .. }, DrawCommand::DrawText { .. }, DrawCommand::FillRect { rect: underline, .. }] =>
            {
                assert_eq!(*color, Color::YELLOW);
                assert_eq!(highlight.x(), 100.0);
                assert_eq!(highlight.width(), width);
                assert_eq!(underline.x(), 100.0);
                assert_eq!(underline.width(), width);
                assert!(underline.y() > 140.0);
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn test_centered_underline_starts_half_width_left() {
        let renderer = CellRenderer::default();
        let style = TextCellStyle::new(40.0).with_underline(true);
        let mut ctx = ctx();
        renderer
            .render_cell(&mut ctx, &text_cell(style.clone()), &RenderOptions::default())
            .unwrap();

        let width = renderer.measurer().width("HELLO", &style.to_text_style());
        let underline = ctx.commands().iter().find_map(|cmd| match cmd {
            DrawCommand::FillRect { rect, .. } => Some(*rect),
            _ => None,
        });
        assert_eq!(underline.map(|r| r.x()), Some(300.0 - width / 2.0));
    }

    #[test]
    fn test_text_uses_effective_bounds() {
        let renderer = CellRenderer::default();
        let mut cell = text_cell(TextCellStyle::default());
        cell.set_animation(typegrid_animation::AnimationType::Sway, 20.0, 1.0);
        cell.play_animation();
        cell.tick(0.5);

        let mut ctx = ctx();
        renderer.render_cell(&mut ctx, &cell, &RenderOptions::default()).unwrap();
        let drawn = texts(ctx.commands());
        assert!((drawn[0].1.x - 320.0).abs() < 1e-3);
        assert_eq!(cell.bounds().x(), 100.0);
    }

    #[test]
    fn test_empty_content_fill() {
        let renderer = CellRenderer::default();

        let mut ctx = ctx();
        renderer
            .render_cell(&mut ctx, &content_cell(CellContent::Empty), &RenderOptions::default())
            .unwrap();
        assert!(ctx.commands().is_empty());

        let mut cell = content_cell(CellContent::Empty);
        if let Some(content) = cell.as_content_mut() {
            content.fill_color = Color::CYAN;
        }
        renderer.render_cell(&mut ctx, &cell, &RenderOptions::default()).unwrap();
        assert_eq!(
            ctx.commands(),
            &[DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 200.0, 100.0),
                color: Color::CYAN,
            }]
        );
    }

    #[test]
    fn test_text_content() {
        let renderer = CellRenderer::default();
        let mut ctx = ctx();
        let cell = content_cell(CellContent::Text(TextContent::new("caption")));
        renderer.render_cell(&mut ctx, &cell, &RenderOptions::default()).unwrap();
        assert_eq!(
            texts(ctx.commands()),
            vec![("caption".to_string(), Point::new(100.0, 50.0))]
        );
    }

    #[test]
    fn test_blank_text_content_paints_fill() {
        let renderer = CellRenderer::default();
        for text in ["", "   "] {
            let mut cell = content_cell(CellContent::Text(TextContent::new(text)));
            if let Some(content) = cell.as_content_mut() {
                content.fill_color = Color::RED;
            }

            let mut ctx = ctx();
            renderer.render_cell(&mut ctx, &cell, &RenderOptions::default()).unwrap();
            assert_eq!(
                ctx.commands(),
                &[DrawCommand::FillRect {
                    rect: Rect::new(0.0, 0.0, 200.0, 100.0),
                    color: Color::RED,
                }]
            );
        }
    }

    #[test]
    fn test_image_is_clipped_to_content_rect() {
        let renderer = CellRenderer::default();
        let image = ImageContent::new(ImageHandle::new(ImageId(3), 100.0, 100.0)).with_padding(10.0);
        let mut ctx = ctx();
        renderer
            .render_cell(&mut ctx, &content_cell(CellContent::Image(image)), &RenderOptions::default())
            .unwrap();

        assert_eq!(
            ctx.commands(),
            &[
                DrawCommand::PushClip(Rect::new(10.0, 10.0, 180.0, 80.0)),
                DrawCommand::DrawImage {
                    image: ImageId(3),
                    rect: Rect::new(60.0, 10.0, 80.0, 80.0),
                    options: ImageOptions::new(),
                },
                DrawCommand::PopClip,
            ]
        );
        assert!(ctx.is_balanced());
    }

    #[test]
    fn test_rotated_image_pushes_transform() {
        let renderer = CellRenderer::default();
        let image = ImageContent::new(ImageHandle::new(ImageId(3), 100.0, 100.0)).with_rotation(30.0);
        let mut ctx = ctx();
        renderer
            .render_cell(&mut ctx, &content_cell(CellContent::Image(image)), &RenderOptions::default())
            .unwrap();

        assert!(matches!(ctx.commands()[1], DrawCommand::PushTransform(_)));
        assert!(ctx.is_balanced());
        assert_eq!(ctx.current_transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_zero_sized_image_is_an_error() {
        let renderer = CellRenderer::default();
        let image = ImageContent::new(ImageHandle::new(ImageId(3), 0.0, 100.0));
        let mut ctx = ctx();
        let result = renderer.render_cell(
            &mut ctx,
            &content_cell(CellContent::Image(image)),
            &RenderOptions::default().with_outlines(true),
        );
        assert!(matches!(result, Err(RenderError::InvalidImage { .. })));
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_invalid_bounds() {
        let renderer = CellRenderer::default();
        let cell = Cell::content(0, 0, Rect::new(0.0, 0.0, f32::NAN, 10.0), "bad");
        let mut ctx = ctx();
        let result = renderer.render_cell(&mut ctx, &cell, &RenderOptions::default());
        assert!(matches!(result, Err(RenderError::InvalidBounds { .. })));
    }

    #[test]
    fn test_mask_reveals_background() {
        let renderer = CellRenderer::default();
        let options = RenderOptions::new(Size::new(800.0, 600.0))
            .with_background_image(ImageHandle::new(ImageId(9), 1600.0, 1200.0));
        let mut ctx = ctx();
        renderer
            .render_cell(&mut ctx, &content_cell(CellContent::Mask(MaskContent::new(0.5))), &options)
            .unwrap();

        assert_eq!(
            ctx.commands(),
            &[
                DrawCommand::PushClip(Rect::new(0.0, 0.0, 200.0, 100.0)),
                DrawCommand::DrawImage {
                    image: ImageId(9),
                    rect: Rect::new(0.0, 0.0, 800.0, 600.0),
                    options: ImageOptions::new().with_opacity(0.5),
                },
                DrawCommand::PopClip,
            ]
        );
    }

    #[test]
    fn test_mask_placeholder_without_background() {
        let renderer = CellRenderer::default();
        let mut ctx = ctx();
        renderer
            .render_cell(
                &mut ctx,
                &content_cell(CellContent::Mask(MaskContent::default())),
                &RenderOptions::default(),
            )
            .unwrap();

        let commands = ctx.commands();
        assert_eq!(commands.len(), 4);
        assert!(matches!(
            commands[1],
            DrawCommand::FillRect { color, .. } if color == MASK_PLACEHOLDER_COLOR
        ));
        assert!(matches!(commands[2], DrawCommand::FillCircle { .. }));
        assert!(ctx.is_balanced());
    }

    #[test]
    fn test_outlines_and_numbers() {
        let renderer = CellRenderer::default();
        let options = RenderOptions::default().with_outlines(true).with_numbers(true);
        let mut cell = content_cell(CellContent::Empty);
        cell.id = 7;

        let mut ctx = ctx();
        renderer.render_cell(&mut ctx, &cell, &options).unwrap();
        match ctx.commands() {
            [DrawCommand::StrokeRect { color, .. }, DrawCommand::DrawText { text, origin, .. }] => {
                assert_eq!(*color, CONTENT_OUTLINE_COLOR);
                assert_eq!(text, "7");
                assert_eq!(*origin, Point::new(4.0, 4.0));
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }
}
