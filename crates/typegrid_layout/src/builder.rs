//! Region accumulator used while detection runs
//!
//! The detector walks the text lines once and reports every region it finds
//! here. Nothing becomes a [`Cell`](crate::cell::Cell) until the whole pass is
//! done and the regions are handed to the matrix assembler.

use typegrid_core::Rect;

use crate::typography::TextCellStyle;

/// Column of content left of a text line
pub const LEFT_COLUMN: usize = 0;
/// Column of the text line itself
pub const TEXT_COLUMN: usize = 1;
/// Column of content right of a text line
pub const RIGHT_COLUMN: usize = 2;
/// Widest matrix a detection can produce
pub const MAX_COLUMNS: usize = RIGHT_COLUMN + 1;

#[derive(Clone, Debug, PartialEq)]
pub enum RegionKind {
    Text {
        text: String,
        line_index: usize,
        style: TextCellStyle,
    },
    Content,
}

/// A discovered cell region. `row` may be negative (the top remainder).
#[derive(Clone, Debug, PartialEq)]
pub struct CellRegion {
    pub row: i32,
    pub col: usize,
    pub bounds: Rect,
    pub kind: RegionKind,
}

#[derive(Debug, Default)]
pub struct GridBuilder {
    regions: Vec<CellRegion>,
    extent: Option<Rect>,
    debug: bool,
    trace: Vec<String>,
}

impl GridBuilder {
    /// `debug` keeps the text of every [`note`](Self::note)
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            ..Default::default()
        }
    }

    pub fn add_text_region(
        &mut self,
        row: i32,
        bounds: Rect,
        text: impl Into<String>,
        line_index: usize,
        style: TextCellStyle,
    ) {
        let text = text.into();
        self.note(|| format!("row {row}: text {text:?} (line {line_index}) at {bounds:?}"));
        self.push(CellRegion {
            row,
            col: TEXT_COLUMN,
            bounds,
            kind: RegionKind::Text {
                text,
                line_index,
                style,
            },
        });
    }

    pub fn add_content_region(&mut self, row: i32, col: usize, bounds: Rect) {
        self.note(|| format!("row {row}, col {col}: content at {bounds:?}"));
        self.push(CellRegion {
            row,
            col,
            bounds,
            kind: RegionKind::Content,
        });
    }

    /// Record a detection step
    ///
    /// Always emitted as a debug event; kept in the trace only in debug mode.
    pub fn note(&mut self, message: impl FnOnce() -> String) {
        let message = message();
        tracing::debug!("{message}");
        if self.debug {
            self.trace.push(message);
        }
    }

    pub fn regions(&self) -> &[CellRegion] {
        &self.regions
    }

    /// Union of every region found so far
    pub fn extent(&self) -> Option<Rect> {
        self.extent
    }

    /// Lowest and highest row seen so far
    pub fn row_range(&self) -> Option<(i32, i32)> {
        let min = self.regions.iter().map(|region| region.row).min()?;
        let max = self.regions.iter().map(|region| region.row).max()?;
        Some((min, max))
    }

    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions and collected trace
    pub fn finish(self) -> (Vec<CellRegion>, Vec<String>) {
        (self.regions, self.trace)
    }

    fn push(&mut self, region: CellRegion) {
        let bounds = region.bounds;
        self.extent = Some(match self.extent {
            Some(extent) => Rect::from_edges(
                extent.x().min(bounds.x()),
                extent.y().min(bounds.y()),
                extent.right().max(bounds.right()),
                extent.bottom().max(bounds.bottom()),
            ),
            None => bounds,
        });
        self.regions.push(region);
    }
}
