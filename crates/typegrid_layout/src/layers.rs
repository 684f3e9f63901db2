//! Rendering layers
//!
//! Layers group cells for draw order and visibility, independently of where
//! the cells sit in the matrix. Membership is keyed by `content_id`, so a
//! layer can be inspected without touching the matrix.
//!
//! Draw order is layer `order` ascending, then matrix row-major within a
//! layer. Invisible layers are skipped entirely.
//!
//! ```text
//!   3  above-main-text   ─┐
//!   2  main-text          │ drawn last → first
//!   1  behind-main-text   │
//!   0  background        ─┘
//! ```

use indexmap::{IndexMap, IndexSet};

use crate::cell::Cell;

pub const BACKGROUND_LAYER: &str = "background";
pub const BEHIND_MAIN_TEXT_LAYER: &str = "behind-main-text";
pub const MAIN_TEXT_LAYER: &str = "main-text";
pub const ABOVE_MAIN_TEXT_LAYER: &str = "above-main-text";

/// Built-in layers as `(id, name, order)`
pub const DEFAULT_LAYERS: [(&str, &str, i32); 4] = [
    (BACKGROUND_LAYER, "Background", 0),
    (BEHIND_MAIN_TEXT_LAYER, "Behind Main Text", 1),
    (MAIN_TEXT_LAYER, "Main Text", 2),
    (ABOVE_MAIN_TEXT_LAYER, "Above Main Text", 3),
];

/// A named rendering layer
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    id: String,
    pub name: String,
    pub order: i32,
    pub visible: bool,
    members: IndexSet<String>,
}

impl Layer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
            visible: true,
            members: IndexSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Member content ids, in insertion order
    pub fn members(&self) -> &IndexSet<String> {
        &self.members
    }

    pub fn contains(&self, content_id: &str) -> bool {
        self.members.contains(content_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Owns the layers of one grid and keeps cell membership consistent
#[derive(Clone, Debug)]
pub struct LayerManager {
    layers: IndexMap<String, Layer>,
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerManager {
    /// Manager with the four built-in layers, all visible
    pub fn new() -> Self {
        let layers = DEFAULT_LAYERS
            .iter()
            .map(|(id, name, order)| (id.to_string(), Layer::new(*id, *name, *order)))
            .collect();
        Self { layers }
    }

    /// Add a custom layer. Returns false if the id is taken.
    pub fn add_layer(&mut self, id: impl Into<String>, name: impl Into<String>, order: i32) -> bool {
        let id = id.into();
        if self.layers.contains_key(&id) {
            tracing::warn!(layer_id = %id, "layer already exists");
            return false;
        }
        let layer = Layer::new(id.clone(), name, order);
        self.layers.insert(id, layer);
        true
    }

    pub fn has_layer(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&Layer> {
        self.layers.get(layer_id)
    }

    pub fn get_layer_mut(&mut self, layer_id: &str) -> Option<&mut Layer> {
        self.layers.get_mut(layer_id)
    }

    /// Layer that currently holds `content_id`
    pub fn layer_of(&self, content_id: &str) -> Option<&Layer> {
        self.layers.values().find(|layer| layer.contains(content_id))
    }

    /// Member content ids of a layer
    pub fn cells_in_layer(&self, layer_id: &str) -> Option<&IndexSet<String>> {
        self.layers.get(layer_id).map(Layer::members)
    }

    pub fn layer_order(&self, layer_id: &str) -> Option<i32> {
        self.layers.get(layer_id).map(|layer| layer.order)
    }

    pub fn is_visible(&self, layer_id: &str) -> bool {
        self.layers.get(layer_id).is_some_and(|layer| layer.visible)
    }

    /// Move `cell` into `layer_id`, updating both sides
    ///
    /// Returns false (and changes nothing) when the layer does not exist.
    pub fn assign_cell_to_layer(&mut self, cell: &mut Cell, layer_id: &str) -> bool {
        if !self.layers.contains_key(layer_id) {
            tracing::warn!(
                layer_id,
                content_id = cell.content_id(),
                "cannot assign cell to unknown layer"
            );
            return false;
        }

        self.remove_cell(cell.content_id());
        if let Some(layer) = self.layers.get_mut(layer_id) {
            layer.members.insert(cell.content_id().to_string());
        }
        cell.layer_id = layer_id.to_string();
        true
    }

    /// Record membership for a cell that already names its layer
    ///
    /// A cell naming a layer this manager does not know falls back to the
    /// default layer for its kind.
    pub fn register_cell(&mut self, cell: &mut Cell) {
        let target = if self.layers.contains_key(cell.layer_id()) {
            cell.layer_id().to_string()
        } else {
            let fallback = cell.cell_type().default_layer();
            tracing::debug!(
                content_id = cell.content_id(),
                layer_id = cell.layer_id(),
                fallback,
                "cell names unknown layer, using default"
            );
            fallback.to_string()
        };
        self.assign_cell_to_layer(cell, &target);
    }

    /// Drop a cell from whichever layer holds it, returning that layer's id
    pub fn remove_cell(&mut self, content_id: &str) -> Option<String> {
        self.layers.values_mut().find_map(|layer| {
            layer
                .members
                .shift_remove(content_id)
                .then(|| layer.id.clone())
        })
    }

    /// Empty every layer but keep the definitions and visibility
    pub fn clear_members(&mut self) {
        for layer in self.layers.values_mut() {
            layer.members.clear();
        }
    }

    pub fn set_visibility(&mut self, layer_id: &str, visible: bool) -> bool {
        match self.layers.get_mut(layer_id) {
            Some(layer) => {
                layer.visible = visible;
                true
            }
            None => {
                tracing::warn!(layer_id, "cannot change visibility of unknown layer");
                false
            }
        }
    }

    /// Flip visibility, returning the new state
    pub fn toggle_visibility(&mut self, layer_id: &str) -> Option<bool> {
        let layer = self.layers.get_mut(layer_id)?;
        layer.visible = !layer.visible;
        Some(layer.visible)
    }

    /// Layers sorted by draw order, ties kept in insertion order
    pub fn ordered_layers(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.values().collect();
        layers.sort_by_key(|layer| layer.order);
        layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
