//! Grid detection
//!
//! Partitions the canvas around the main text. Each text line becomes one
//! row; content cells fill the space to its left and right, and remainder
//! cells take the space above the first line and below the last.
//!
//! ```text
//!   ┌──────────────────────────────────┐
//!   │ top remainder           (row -1) │
//!   ├──────────┬─────────┬─────────────┤
//!   │ left     │ HELLO   │ right       │  row 0
//!   ├──────────┼─────────┼─────────────┤
//!   │ left     │ WORLD   │ right       │  row 1
//!   ├──────────┴─────────┴─────────────┤
//!   │ bottom remainder         (row 2) │
//!   └──────────────────────────────────┘
//! ```
//!
//! Content candidates smaller than `min_cell_size` in either dimension are
//! dropped; a candidate exactly at the minimum is kept. This includes the top
//! and bottom remainders: a remainder strip narrower than `min_cell_size`
//! (a heavily padded canvas) is dropped even when it is tall enough. The
//! space between two consecutive lines does not become a row.

use typegrid_core::{Padding, Rect, Size};

use crate::builder::{GridBuilder, LEFT_COLUMN, RIGHT_COLUMN};
use crate::config::GridConfig;
use crate::identity::{IdGenerator, UuidGenerator};
use crate::matrix::{assemble, CellMatrix};
use crate::typography::TextCellStyle;

/// Bounding box of one shaped line of main text
#[derive(Clone, Debug, PartialEq)]
pub struct TextLineBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
    /// Position in the full text; defaults to the position in the input list
    pub line_index: Option<usize>,
    /// Typography for the line's cell; defaults to [`TextCellStyle::default`]
    pub style: Option<TextCellStyle>,
}

impl TextLineBounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            text: text.into(),
            line_index: None,
            style: None,
        }
    }

    pub fn with_line_index(mut self, line_index: usize) -> Self {
        self.line_index = Some(line_index);
        self
    }

    pub fn with_style(mut self, style: TextCellStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Result of one detection pass
#[derive(Clone, Debug)]
pub struct Detection {
    pub matrix: CellMatrix,
    pub rows: usize,
    pub cols: usize,
    /// The non-blank lines that produced rows, with line indices resolved
    pub text_bounds: Vec<TextLineBounds>,
    pub canvas: Size,
    pub padding: Padding,
}

/// Turns canvas size, text line bounds, and padding into a cell matrix
pub struct GridDetector {
    config: GridConfig,
    ids: Box<dyn IdGenerator>,
    trace: Vec<String>,
}

impl Default for GridDetector {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl std::fmt::Debug for GridDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridDetector")
            .field("config", &self.config)
            .field("trace_len", &self.trace.len())
            .finish()
    }
}

impl GridDetector {
    /// Detector generating random content ids
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            ids: Box::new(UuidGenerator),
            trace: Vec::new(),
        }
    }

    /// Use a different id source for content cells
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
    }

    /// Effective minimum content cell size, floor applied
    pub fn min_cell_size(&self) -> f32 {
        self.config.effective_min_cell_size()
    }

    /// Steps recorded by the last pass (empty unless debug is on)
    pub fn debug_trace(&self) -> &[String] {
        &self.trace
    }

    /// Run detection using the configured default padding
    pub fn detect_with_default_padding(
        &mut self,
        canvas: Size,
        text_bounds: &[TextLineBounds],
    ) -> Detection {
        let padding = self.config.default_padding();
        self.detect(canvas, text_bounds, padding)
    }

    /// Run one detection pass
    pub fn detect(
        &mut self,
        canvas: Size,
        text_bounds: &[TextLineBounds],
        padding: Padding,
    ) -> Detection {
        let padding = padding.clamped();
        let usable = canvas.to_rect().shrink(padding);
        let min_size = self.min_cell_size();
        let mut builder = GridBuilder::new(self.config.debug);

        builder.note(|| {
            format!(
                "canvas {}x{}, usable {:?}, min cell size {}",
                canvas.width, canvas.height, usable, min_size
            )
        });

        let lines: Vec<TextLineBounds> = text_bounds
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.is_blank())
            .map(|(index, line)| {
                let mut line = line.clone();
                line.line_index.get_or_insert(index);
                line
            })
            .collect();

        if lines.is_empty() {
            builder.note(|| "no text lines, single cell covers the usable area".to_string());
            builder.add_content_region(0, LEFT_COLUMN, usable);
        } else {
            self.scan_lines(&mut builder, &lines, usable, min_size);
        }

        let (regions, trace) = builder.finish();
        let matrix = assemble(regions, self.ids.as_mut());
        self.trace = trace;

        tracing::debug!(
            rows = matrix.rows(),
            cols = matrix.cols(),
            lines = lines.len(),
            "grid detection complete"
        );

        Detection {
            rows: matrix.rows(),
            cols: matrix.cols(),
            matrix,
            text_bounds: lines,
            canvas,
            padding,
        }
    }

    fn scan_lines(
        &self,
        builder: &mut GridBuilder,
        lines: &[TextLineBounds],
        usable: Rect,
        min_size: f32,
    ) {
        let offer = |builder: &mut GridBuilder, row: i32, col: usize, label: &str, rect: Rect| {
            if qualifies(rect, min_size) {
                builder.add_content_region(row, col, rect);
            } else {
                builder.note(|| {
                    format!(
                        "row {row}: {label} candidate {}x{} below minimum, skipped",
                        rect.width(),
                        rect.height()
                    )
                });
            }
        };

        for (row, line) in lines.iter().enumerate() {
            let row = row as i32;
            let bounds = line.bounds();

            let left = Rect::from_edges(usable.x(), bounds.y(), bounds.x(), bounds.bottom());
            offer(builder, row, LEFT_COLUMN, "left", left);

            builder.add_text_region(
                row,
                bounds,
                line.text.clone(),
                line.line_index.unwrap_or(row as usize),
                line.style.clone().unwrap_or_default(),
            );

            let right = Rect::from_edges(bounds.right(), bounds.y(), usable.right(), bounds.bottom());
            offer(builder, row, RIGHT_COLUMN, "right", right);
        }

        if let (Some(first), Some(last)) = (lines.first(), lines.last()) {
            let top = Rect::from_edges(usable.x(), usable.y(), usable.right(), first.y);
            offer(builder, -1, LEFT_COLUMN, "top", top);

            let bottom_row = lines.len() as i32;
            let bottom = Rect::from_edges(
                usable.x(),
                last.bounds().bottom(),
                usable.right(),
                usable.bottom(),
            );
            offer(builder, bottom_row, LEFT_COLUMN, "bottom", bottom);
        }
    }
}

/// Inclusive size gate; NaN and negative extents never qualify
fn qualifies(rect: Rect, min_size: f32) -> bool {
    rect.width() >= min_size && rect.height() >= min_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, CellType};
    use crate::content::ContentType;
    use crate::identity::{text_content_id, SequentialIdGenerator};

    fn detector() -> GridDetector {
        GridDetector::default().with_id_generator(SequentialIdGenerator::default())
    }

    fn hello_world() -> Vec<TextLineBounds> {
        vec![
            TextLineBounds::new(300.0, 100.0, 200.0, 60.0, "HELLO"),
            TextLineBounds::new(300.0, 300.0, 200.0, 60.0, "WORLD"),
        ]
    }

    const CANVAS: Size = Size::new(800.0, 600.0);

    #[test]
    fn test_hello_world_fills_every_slot() {
        let detection = detector().detect(CANVAS, &hello_world(), Padding::uniform(20.0));

        assert_eq!(detection.rows, 4);
        assert_eq!(detection.cols, 3);
        assert_eq!(detection.matrix.cell_count(), 8);

        let top = detection.matrix.get(0, 0).map(Cell::bounds);
        assert_eq!(top, Some(Rect::new(20.0, 20.0, 760.0, 80.0)));

        for row in 1..=2 {
            let left = detection.matrix.get(row, 0).map(Cell::bounds);
            let right = detection.matrix.get(row, 2).map(Cell::bounds);
            assert_eq!(left.map(|r| r.width()), Some(280.0));
            assert_eq!(right.map(|r| r.width()), Some(280.0));
            assert_eq!(
                detection.matrix.get(row, 1).map(Cell::cell_type),
                Some(CellType::MainText)
            );
        }

        let bottom = detection.matrix.get(3, 0).map(Cell::bounds);
        assert_eq!(bottom, Some(Rect::new(20.0, 360.0, 760.0, 220.0)));
    }

    #[test]
    fn test_no_lines_gives_single_cell() {
        let padding = Padding::new(10.0, 20.0, 30.0, 40.0);
        let detection = detector().detect(CANVAS, &[], padding);

        assert_eq!((detection.rows, detection.cols), (1, 1));
        let cell = detection.matrix.get(0, 0);
        assert_eq!(cell.map(Cell::bounds), Some(Rect::new(40.0, 10.0, 740.0, 560.0)));
        assert_eq!(
            cell.and_then(Cell::as_content).map(|c| c.content_type()),
            Some(ContentType::Empty)
        );
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let lines = vec![
            TextLineBounds::new(300.0, 100.0, 200.0, 60.0, "   "),
            TextLineBounds::new(300.0, 200.0, 200.0, 60.0, "HI"),
        ];
        let detection = detector().detect(CANVAS, &lines, Padding::uniform(20.0));

        assert_eq!(detection.text_bounds.len(), 1);
        assert_eq!(detection.text_bounds[0].line_index, Some(1));

        let text_cells: Vec<&Cell> = detection.matrix.iter().filter(|c| c.is_main_text()).collect();
        assert_eq!(text_cells.len(), 1);
        assert_eq!(text_cells[0].content_id(), text_content_id("HI", 1));
    }

    #[test]
    fn test_row_count_law() {
        // Tall lines at the very top and bottom leave no remainder
        let lines = vec![
            TextLineBounds::new(300.0, 20.0, 200.0, 60.0, "A"),
            TextLineBounds::new(300.0, 100.0, 200.0, 60.0, "B"),
            TextLineBounds::new(300.0, 540.0, 200.0, 40.0, "C"),
        ];
        let detection = detector().detect(CANVAS, &lines, Padding::uniform(20.0));
        assert_eq!(detection.rows, 3);

        // Only a top remainder
        let lines = vec![TextLineBounds::new(300.0, 500.0, 200.0, 80.0, "A")];
        let detection = detector().detect(CANVAS, &lines, Padding::uniform(20.0));
        assert_eq!(detection.rows, 2);
        assert!(detection.matrix.get(0, 0).is_some_and(|c| !c.is_main_text()));
    }

    #[test]
    fn test_min_cell_size_boundary_is_inclusive() {
        // Left gap exactly 50 wide, right gap 49 wide
        let lines = vec![TextLineBounds::new(70.0, 100.0, 661.0, 60.0, "EDGE")];
        let detection = detector().detect(CANVAS, &lines, Padding::uniform(20.0));

        let row = detection
            .matrix
            .iter()
            .find(|c| c.is_main_text())
            .map(|c| c.row);
        let Some(row) = row else {
            panic!("text cell missing");
        };
        assert_eq!(detection.matrix.get(row, 0).map(|c| c.bounds().width()), Some(50.0));
        assert!(detection.matrix.get(row, 2).is_none());
    }

    #[test]
    fn test_short_lines_skip_side_cells() {
        // Line height below the minimum drops both side candidates
        let lines = vec![TextLineBounds::new(300.0, 200.0, 200.0, 30.0, "tiny")];
        let detection = detector().detect(CANVAS, &lines, Padding::uniform(20.0));
        assert_eq!(detection.matrix.iter().filter(|c| c.row == 1).count(), 1);
    }

    #[test]
    fn test_narrow_remainders_are_dropped() {
        // Side padding leaves a 40px wide strip: tall remainders, too narrow
        let padding = Padding::new(20.0, 380.0, 20.0, 380.0);
        let lines = vec![TextLineBounds::new(380.0, 200.0, 40.0, 60.0, "I")];
        let detection = detector().detect(CANVAS, &lines, padding);

        assert_eq!(detection.rows, 1);
        assert_eq!(detection.matrix.cell_count(), 1);
        assert!(detection.matrix.iter().all(Cell::is_main_text));
    }

    #[test]
    fn test_configured_min_cell_size() {
        let config = GridConfig::new().with_min_cell_size(300.0);
        let mut detector =
            GridDetector::new(config).with_id_generator(SequentialIdGenerator::default());
        let detection = detector.detect(CANVAS, &hello_world(), Padding::uniform(20.0));

        // Sides (280 wide) and the top remainder (80 tall) are gone
        assert_eq!(detection.rows, 2);
        assert_eq!(detection.matrix.cell_count(), 2);
    }

    #[test]
    fn test_negative_padding_clamps() {
        let detection = detector().detect(CANVAS, &[], Padding {
            top: -5.0,
            right: -5.0,
            bottom: -5.0,
            left: -5.0,
        });
        assert_eq!(
            detection.matrix.get(0, 0).map(Cell::bounds),
            Some(Rect::new(0.0, 0.0, 800.0, 600.0))
        );
        assert_eq!(detection.padding, Padding::ZERO);
    }

    #[test]
    fn test_text_ids_stable_across_detections() {
        let mut detector = detector();
        let first = detector.detect(CANVAS, &hello_world(), Padding::uniform(20.0));
        let second = detector.detect(CANVAS, &hello_world(), Padding::uniform(40.0));

        let ids = |d: &Detection| -> Vec<String> {
            d.matrix
                .iter()
                .filter(|c| c.is_main_text())
                .map(|c| c.content_id().to_string())
                .collect()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_debug_trace() {
        let mut quiet = detector();
        quiet.detect(CANVAS, &hello_world(), Padding::uniform(20.0));
        assert!(quiet.debug_trace().is_empty());

        let mut loud = GridDetector::new(GridConfig::new().with_debug(true))
            .with_id_generator(SequentialIdGenerator::default());
        loud.detect(CANVAS, &hello_world(), Padding::uniform(20.0));
        assert!(!loud.debug_trace().is_empty());
        assert!(loud.debug_trace().iter().any(|step| step.contains("HELLO")));
    }

    #[test]
    fn test_default_padding_from_config() {
        let config = GridConfig::new().with_default_padding(Padding::uniform(50.0));
        let mut detector =
            GridDetector::new(config).with_id_generator(SequentialIdGenerator::default());
        let detection = detector.detect_with_default_padding(CANVAS, &[]);
        assert_eq!(
            detection.matrix.get(0, 0).map(Cell::bounds),
            Some(Rect::new(50.0, 50.0, 700.0, 500.0))
        );
    }
}
