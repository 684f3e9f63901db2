//! The live grid
//!
//! A [`Grid`] owns the cell matrix produced by detection together with the
//! layer manager that groups those cells. It is the single mutable home of
//! grid state: per-frame animation ticks, layer changes, rebuilds, and
//! snapshots all go through it.

use rustc_hash::{FxHashMap, FxHashSet};
use typegrid_core::{Padding, Point, Size};

use crate::cell::{Cell, CellKind};
use crate::detector::{Detection, TextLineBounds};
use crate::error::{GridError, Result};
use crate::identity::{IdGenerator, UuidGenerator};
use crate::layers::LayerManager;
use crate::matrix::CellMatrix;
use crate::snapshot::{CanvasData, GridData, GridSnapshot, LayerData};

#[derive(Clone, Debug)]
pub struct Grid {
    matrix: CellMatrix,
    text_bounds: Vec<TextLineBounds>,
    layers: LayerManager,
    canvas: Size,
    padding: Padding,
}

impl Grid {
    /// Grid for a fresh detection, every cell in its default layer
    pub fn from_detection(detection: Detection) -> Self {
        Self::with_layers(detection, LayerManager::new())
    }

    fn with_layers(detection: Detection, mut layers: LayerManager) -> Self {
        let mut matrix = detection.matrix;
        for cell in matrix.iter_mut() {
            layers.register_cell(cell);
        }

        Self {
            matrix,
            text_bounds: detection.text_bounds,
            layers,
            canvas: detection.canvas,
            padding: detection.padding,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }

    pub fn cols(&self) -> usize {
        self.matrix.cols()
    }

    pub fn matrix(&self) -> &CellMatrix {
        &self.matrix
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.matrix.get(row, col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.matrix.get_mut(row, col)
    }

    pub fn cell_by_content_id(&self, content_id: &str) -> Option<&Cell> {
        self.matrix.find(content_id)
    }

    pub fn cell_by_content_id_mut(&mut self, content_id: &str) -> Option<&mut Cell> {
        self.matrix.find_mut(content_id)
    }

    /// Occupied cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.matrix.iter()
    }

    pub fn text_bounds(&self) -> &[TextLineBounds] {
        &self.text_bounds
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerManager {
        &mut self.layers
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layers
    // ─────────────────────────────────────────────────────────────────────────

    /// Move the cell at `(row, col)` into `layer_id`
    pub fn set_cell_layer(&mut self, row: usize, col: usize, layer_id: &str) -> bool {
        let Some(cell) = self.matrix.get_mut(row, col) else {
            tracing::warn!(row, col, layer_id, "no cell at position");
            return false;
        };
        self.layers.assign_cell_to_layer(cell, layer_id)
    }

    /// Cells in draw order: visible layers by `order`, row-major within a layer
    pub fn render_order(&self) -> Vec<&Cell> {
        self.layers
            .ordered_layers()
            .into_iter()
            .filter(|layer| layer.visible)
            .flat_map(|layer| {
                self.matrix
                    .iter()
                    .filter(move |cell| cell.layer_id() == layer.id())
            })
            .collect()
    }

    /// Top-most visible cell whose animated bounds contain `point`
    pub fn hit_test(&self, point: Point) -> Option<&Cell> {
        self.render_order()
            .into_iter()
            .rev()
            .find(|cell| cell.effective_bounds().contains(point))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Animation
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance every cell's animation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for cell in self.matrix.iter_mut() {
            cell.tick(dt);
        }
    }

    pub fn has_playing_animations(&self) -> bool {
        self.matrix
            .iter()
            .any(|cell| cell.animation().is_some_and(|a| a.is_playing()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rebuild
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the grid with a new detection, carrying configuration over
    ///
    /// Text cells inherit style, layer, and animation from the previous cell
    /// with the same `content_id`. Content cells inherit content, fill, layer,
    /// animation, and identity from the previous content cell at the same
    /// position, unless that content id is already used by a text cell. Fresh
    /// ids that collide with a carried one are regenerated. Layer definitions
    /// and visibility are kept. The new grid is built completely before it
    /// replaces the old one.
    pub fn rebuild(&mut self, detection: Detection) {
        let mut layers = self.layers.clone();
        layers.clear_members();

        let mut matrix = detection.matrix;
        let mut carried = 0usize;
        {
            let mut by_content_id: FxHashMap<&str, &Cell> = FxHashMap::default();
            let mut by_position: FxHashMap<(usize, usize), &Cell> = FxHashMap::default();
            for cell in self.matrix.iter() {
                match cell.kind {
                    CellKind::MainText(_) => {
                        by_content_id.insert(cell.content_id(), cell);
                    }
                    CellKind::Content(_) => {
                        by_position.insert((cell.row, cell.col), cell);
                    }
                }
            }

            for cell in matrix.iter_mut() {
                let previous = match cell.kind {
                    CellKind::MainText(_) => by_content_id.get(cell.content_id()),
                    CellKind::Content(_) => by_position.get(&(cell.row, cell.col)),
                };
                if let Some(previous) = previous {
                    cell.inherit_from(previous);
                    carried += 1;
                }
            }

            assign_content_ids(&mut matrix, &by_position);
        }

        let next = Self::with_layers(
            Detection {
                matrix,
                ..detection
            },
            layers,
        );

        tracing::debug!(
            rows = next.rows(),
            cols = next.cols(),
            carried,
            "grid rebuilt"
        );
        *self = next;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Snapshots
    // ─────────────────────────────────────────────────────────────────────────

    /// Capture grid, canvas, layers, and the host's `config`
    pub fn snapshot(&self, config: serde_json::Value) -> GridSnapshot {
        let cells = self
            .matrix
            .iter()
            .map(|cell| {
                let mut data = cell.serialize();
                data.layer_order = self.layers.layer_order(cell.layer_id());
                data
            })
            .collect();

        let layers = self
            .layers
            .ordered_layers()
            .into_iter()
            .map(|layer| LayerData {
                id: layer.id().to_string(),
                name: layer.name.clone(),
                order: layer.order,
                visible: layer.visible,
            })
            .collect();

        GridSnapshot::new(
            CanvasData::new(self.canvas, self.padding),
            Some(GridData {
                rows: self.rows(),
                cols: self.cols(),
                cells,
            }),
            layers,
            config,
        )
    }

    /// Rebuild a grid from a snapshot
    ///
    /// Refuses with [`GridError::InvalidSnapshot`] when validation finds
    /// anything wrong; call [`GridSnapshot::validate`] first to inspect.
    pub fn restore(snapshot: &GridSnapshot) -> Result<Self> {
        let issues = snapshot.validate();
        if !issues.is_empty() {
            return Err(GridError::InvalidSnapshot(issues));
        }
        let Some(grid) = &snapshot.grid else {
            return Err(GridError::InvalidSnapshot(Vec::new()));
        };

        let mut layers = LayerManager::new();
        for data in &snapshot.layers {
            match layers.get_layer_mut(&data.id) {
                Some(layer) => {
                    layer.name = data.name.clone();
                    layer.order = data.order;
                    layer.visible = data.visible;
                }
                None => {
                    layers.add_layer(data.id.clone(), data.name.clone(), data.order);
                    layers.set_visibility(&data.id, data.visible);
                }
            }
        }

        let mut matrix = CellMatrix::new(grid.rows, grid.cols);
        for data in &grid.cells {
            let cell = Cell::deserialize(data)?;
            if matrix.set(cell).is_err() {
                return Err(GridError::cell_data(&data.content_id, "position outside the matrix"));
            }
        }

        let mut text_bounds: Vec<TextLineBounds> = matrix
            .iter()
            .filter_map(|cell| {
                let text = cell.as_main_text()?;
                let bounds = cell.bounds();
                Some(TextLineBounds {
                    x: bounds.x(),
                    y: bounds.y(),
                    width: bounds.width(),
                    height: bounds.height(),
                    text: text.text.clone(),
                    line_index: Some(text.line_index),
                    style: Some(text.style.clone()),
                })
            })
            .collect();
        text_bounds.sort_by(|a, b| a.y.total_cmp(&b.y));

        tracing::debug!(
            rows = grid.rows,
            cols = grid.cols,
            cells = grid.cells.len(),
            "restored grid from snapshot"
        );

        Ok(Self::with_layers(
            Detection {
                rows: matrix.rows(),
                cols: matrix.cols(),
                matrix,
                text_bounds,
                canvas: snapshot.canvas.size(),
                padding: snapshot.canvas.padding.into(),
            },
            layers,
        ))
    }
}

/// Give every content cell of a rebuilt matrix a unique content id
///
/// Text ids are content-derived and never change. A content cell takes over
/// the id of the content cell previously at its position when no text cell
/// holds it; every other content cell keeps its fresh id unless that id is
/// already claimed.
fn assign_content_ids(matrix: &mut CellMatrix, previous: &FxHashMap<(usize, usize), &Cell>) {
    let mut claimed: FxHashSet<String> = matrix
        .iter()
        .filter(|cell| cell.is_main_text())
        .map(|cell| cell.content_id().to_string())
        .collect();

    let mut unresolved = FxHashSet::default();
    for cell in matrix.iter_mut().filter(|cell| !cell.is_main_text()) {
        let inherited = previous
            .get(&(cell.row, cell.col))
            .map(|old| old.content_id());
        match inherited {
            Some(id) if !claimed.contains(id) => {
                claimed.insert(id.to_string());
                cell.set_content_id(id);
            }
            _ => {
                unresolved.insert((cell.row, cell.col));
            }
        }
    }

    let mut ids = UuidGenerator;
    for cell in matrix
        .iter_mut()
        .filter(|cell| unresolved.contains(&(cell.row, cell.col)))
    {
        if claimed.insert(cell.content_id().to_string()) {
            continue;
        }
        let mut id = ids.next_id();
        while claimed.contains(&id) {
            id = ids.next_id();
        }
        tracing::debug!(
            row = cell.row,
            col = cell.col,
            taken = cell.content_id(),
            "content id already in use, regenerated"
        );
        claimed.insert(id.clone());
        cell.set_content_id(id);
    }
}
