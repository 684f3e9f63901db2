//! Grid matrix
//!
//! [`assemble`] turns the detector's unordered region list into a dense
//! row/column matrix. Rows are normalized so the top-most region lands in
//! row 0, and cells are numbered row-major once everything is placed.

use smallvec::{smallvec, SmallVec};

use crate::builder::{CellRegion, RegionKind};
use crate::cell::Cell;
use crate::identity::IdGenerator;

/// One matrix row; at most three logical columns in practice
pub type CellRow = SmallVec<[Option<Cell>; 3]>;

/// Dense matrix of optional cells
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellMatrix {
    rows: Vec<CellRow>,
    cols: usize,
}

impl CellMatrix {
    /// `rows` × `cols` empty slots
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| smallvec![None; cols]).collect(),
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row)?.get_mut(col)?.as_mut()
    }

    pub fn row(&self, row: usize) -> Option<&[Option<Cell>]> {
        self.rows.get(row).map(|cells| cells.as_slice())
    }

    /// Put `cell` at its own `(row, col)`
    ///
    /// Returns the cell it displaced, or gives `cell` back when its position
    /// lies outside the matrix.
    pub fn set(&mut self, cell: Cell) -> Result<Option<Cell>, Cell> {
        match self
            .rows
            .get_mut(cell.row)
            .and_then(|row| row.get_mut(cell.col))
        {
            Some(slot) => Ok(slot.replace(cell)),
            None => Err(cell),
        }
    }

    /// Occupied cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|row| row.iter().flatten())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.rows.iter_mut().flat_map(|row| row.iter_mut().flatten())
    }

    pub fn cell_count(&self) -> usize {
        self.iter().count()
    }

    pub fn find(&self, content_id: &str) -> Option<&Cell> {
        self.iter().find(|cell| cell.content_id() == content_id)
    }

    pub fn find_mut(&mut self, content_id: &str) -> Option<&mut Cell> {
        self.iter_mut().find(|cell| cell.content_id() == content_id)
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Cell> {
        self.iter().find(|cell| cell.id == id)
    }

    pub fn position_of(&self, content_id: &str) -> Option<(usize, usize)> {
        self.find(content_id).map(|cell| (cell.row, cell.col))
    }

    /// Number occupied cells row-major, starting at 1
    pub fn renumber(&mut self) {
        for (index, cell) in self.iter_mut().enumerate() {
            cell.id = index as u32 + 1;
        }
    }
}

/// Build the matrix for a list of regions
///
/// Regions are stably sorted by `(row, col)`; when two share a position the
/// later one wins. An empty list yields a 0×0 matrix.
pub fn assemble(mut regions: Vec<CellRegion>, ids: &mut dyn IdGenerator) -> CellMatrix {
    regions.sort_by_key(|region| (region.row, region.col));

    let (Some(min_row), Some(max_row), Some(max_col)) = (
        regions.first().map(|region| region.row),
        regions.last().map(|region| region.row),
        regions.iter().map(|region| region.col).max(),
    ) else {
        return CellMatrix::default();
    };

    let rows = (max_row - min_row) as usize + 1;
    let mut matrix = CellMatrix::new(rows, max_col + 1);

    for region in regions {
        let row = (region.row - min_row) as usize;
        let cell = match region.kind {
            RegionKind::Text {
                text,
                line_index,
                style,
            } => Cell::main_text(row, region.col, region.bounds, text, line_index, style),
            RegionKind::Content => Cell::content(row, region.col, region.bounds, ids.next_id()),
        };

        match matrix.set(cell) {
            Ok(Some(replaced)) => {
                tracing::warn!(
                    row,
                    col = region.col,
                    replaced = replaced.content_id(),
                    "duplicate region, keeping the later one"
                );
            }
            Ok(None) => {}
            Err(cell) => {
                tracing::warn!(row, col = cell.col, "region outside the matrix, dropped");
            }
        }
    }

    matrix.renumber();
    tracing::debug!(
        rows = matrix.rows(),
        cols = matrix.cols(),
        cells = matrix.cell_count(),
        "assembled grid matrix"
    );
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::SequentialIdGenerator;
    use crate::typography::TextCellStyle;
    use typegrid_core::Rect;

    fn content(row: i32, col: usize) -> CellRegion {
        CellRegion {
            row,
            col,
            bounds: Rect::new(col as f32 * 10.0, row as f32 * 10.0, 10.0, 10.0),
            kind: RegionKind::Content,
        }
    }

    fn text(row: i32, value: &str) -> CellRegion {
        CellRegion {
            row,
            col: 1,
            bounds: Rect::new(10.0, row as f32 * 10.0, 10.0, 10.0),
            kind: RegionKind::Text {
                text: value.to_string(),
                line_index: row.max(0) as usize,
                style: TextCellStyle::default(),
            },
        }
    }

    #[test]
    fn test_empty_regions_give_empty_matrix() {
        let matrix = assemble(Vec::new(), &mut SequentialIdGenerator::default());
        assert_eq!(matrix.rows(), 0);
        assert_eq!(matrix.cols(), 0);
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_negative_rows_are_normalized() {
        let regions = vec![content(1, 0), text(0, "A"), content(-1, 0), content(0, 2)];
        let matrix = assemble(regions, &mut SequentialIdGenerator::default());

        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 3);
        for cell in matrix.iter() {
            assert_eq!(matrix.get(cell.row, cell.col), Some(cell));
        }
        assert!(matrix.get(0, 0).is_some());
        assert!(matrix.get(0, 1).is_none());
        assert!(matrix.get(1, 1).is_some_and(Cell::is_main_text));
    }

    #[test]
    fn test_ids_are_row_major_from_one() {
        let regions = vec![content(0, 2), text(0, "A"), content(0, 0), content(-1, 0)];
        let matrix = assemble(regions, &mut SequentialIdGenerator::default());

        let ids: Vec<(usize, usize, u32)> =
            matrix.iter().map(|cell| (cell.row, cell.col, cell.id)).collect();
        assert_eq!(ids, vec![(0, 0, 1), (1, 0, 2), (1, 1, 3), (1, 2, 4)]);
        assert_eq!(matrix.find_by_id(3).map(Cell::is_main_text), Some(true));
    }

    #[test]
    fn test_duplicate_position_later_wins() {
        let mut first = content(0, 0);
        first.bounds = Rect::new(1.0, 1.0, 1.0, 1.0);
        let mut second = content(0, 0);
        second.bounds = Rect::new(2.0, 2.0, 2.0, 2.0);

        let matrix = assemble(vec![first, second], &mut SequentialIdGenerator::default());
        assert_eq!(matrix.cell_count(), 1);
        assert_eq!(
            matrix.get(0, 0).map(Cell::bounds),
            Some(Rect::new(2.0, 2.0, 2.0, 2.0))
        );
    }

    #[test]
    fn test_lookup_by_content_id() {
        let matrix = assemble(
            vec![content(0, 0), text(0, "A")],
            &mut SequentialIdGenerator::new("c"),
        );
        assert_eq!(matrix.position_of("c-1"), Some((0, 0)));
        assert!(matrix.find("missing").is_none());
    }

    #[test]
    fn test_set_outside_is_rejected() {
        let mut matrix = CellMatrix::new(1, 1);
        let cell = Cell::content(4, 0, Rect::new(0.0, 0.0, 1.0, 1.0), "x");
        assert!(matrix.set(cell).is_err());
    }
}
