//! Frame painting
//!
//! [`GridPainter`] walks a grid in layer order and hands each cell to the
//! [`CellRenderer`]. A cell that fails to render is logged and skipped; the
//! rest of the frame still draws.

use typegrid_core::DrawContext;
use typegrid_layout::Grid;

use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::renderer::CellRenderer;

/// Outcome of one [`GridPainter::paint`] call
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PaintReport {
    /// Cells drawn successfully
    pub drawn: usize,
    /// Cells skipped, with the reason
    pub failed: Vec<RenderError>,
}

impl PaintReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct GridPainter {
    renderer: CellRenderer,
    options: RenderOptions,
}

impl GridPainter {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            renderer: CellRenderer::default(),
            options,
        }
    }

    pub fn with_renderer(mut self, renderer: CellRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn renderer(&self) -> &CellRenderer {
        &self.renderer
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Draw every visible cell of `grid`
    pub fn paint(&self, ctx: &mut dyn DrawContext, grid: &Grid) -> PaintReport {
        let mut report = PaintReport::default();

        for cell in grid.render_order() {
            match self.renderer.render_cell(ctx, cell, &self.options) {
                Ok(()) => report.drawn += 1,
                Err(e) => {
                    tracing::warn!(
                        row = cell.row,
                        col = cell.col,
                        layer = cell.layer_id(),
                        "skipping cell: {e}"
                    );
                    report.failed.push(e);
                }
            }
        }

        tracing::trace!(drawn = report.drawn, failed = report.failed.len(), "painted grid");
        report
    }
}
