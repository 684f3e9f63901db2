//! Snapshots and cell serialization
//!
//! Grid state is written through plain serde types rather than by deriving
//! serde on the live model. The field names follow the saved-preset format
//! (camelCase, `type`, `originalBounds`, `layerOrder`), which the live types
//! have no reason to mirror.
//!
//! ```text
//! GridSnapshot
//! ├── metadata { timestamp, version, snapshotType }
//! ├── grid     { rows, cols, cells: [CellData] }
//! ├── canvas   { width, height, padding }
//! ├── layers   [ { id, name, order, visible } ]
//! └── config   (opaque host JSON)
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use typegrid_animation::{AnimationType, CellAnimation};
use typegrid_core::{Color, FontWeight, ImageHandle, ImageId, Padding, Rect, Size, TextAlign};

use crate::cell::{Cell, CellKind, CellType, ContentCell, MainTextCell};
use crate::builder::MAX_COLUMNS;
use crate::content::{
    CellContent, ContentType, HorizontalAnchor, ImageContent, MaskContent, TextContent,
    VerticalAnchor,
};
use crate::error::{GridError, Result};
use crate::layers::DEFAULT_LAYERS;
use crate::typography::TextCellStyle;

/// Format version written to every snapshot
pub const SNAPSHOT_VERSION: &str = "1.0";

/// `snapshotType` of a full grid snapshot
pub const GRID_SNAPSHOT_TYPE: &str = "grid";

// ─────────────────────────────────────────────────────────────────────────────
// Primitives
// ─────────────────────────────────────────────────────────────────────────────

/// A rectangle with position and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundsData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<Rect> for BoundsData {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x(),
            y: rect.y(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

impl From<BoundsData> for Rect {
    fn from(bounds: BoundsData) -> Self {
        Rect::new(bounds.x, bounds.y, bounds.width, bounds.height)
    }
}

/// Per-side padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingData {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl From<Padding> for PaddingData {
    fn from(padding: Padding) -> Self {
        Self {
            top: padding.top,
            right: padding.right,
            bottom: padding.bottom,
            left: padding.left,
        }
    }
}

impl From<PaddingData> for Padding {
    fn from(padding: PaddingData) -> Self {
        Padding::new(padding.top, padding.right, padding.bottom, padding.left)
    }
}

/// `#rrggbbaa`
pub fn color_to_hex(color: Color) -> String {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a)
    )
}

/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional)
pub fn color_from_hex(value: &str) -> Option<Color> {
    let digits = value.trim().trim_start_matches('#');
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return None;
    }

    let channel = |index: usize| -> Option<f32> {
        let byte = u8::from_str_radix(digits.get(index * 2..index * 2 + 2)?, 16).ok()?;
        Some(byte as f32 / 255.0)
    };

    let alpha = if digits.len() == 8 { channel(3)? } else { 1.0 };
    Some(Color::rgba(channel(0)?, channel(1)?, channel(2)?, alpha))
}

fn parse_color(value: &str) -> std::result::Result<Color, String> {
    color_from_hex(value).ok_or_else(|| format!("invalid color {value:?}"))
}

fn align_str(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    }
}

fn parse_align(value: &str) -> std::result::Result<TextAlign, String> {
    match value {
        "left" => Ok(TextAlign::Left),
        "center" => Ok(TextAlign::Center),
        "right" => Ok(TextAlign::Right),
        other => Err(format!("invalid alignment {other:?}")),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cell Data
// ─────────────────────────────────────────────────────────────────────────────

/// Serialized animation state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationData {
    #[serde(rename = "type")]
    pub animation_type: String,
    pub intensity: f32,
    pub speed: f32,
    pub is_playing: bool,
}

impl From<&CellAnimation> for AnimationData {
    fn from(animation: &CellAnimation) -> Self {
        Self {
            animation_type: animation.animation_type().to_string(),
            intensity: animation.intensity(),
            speed: animation.speed(),
            is_playing: animation.is_playing(),
        }
    }
}

impl AnimationData {
    /// `None` for the `none` animation type
    pub fn to_animation(&self) -> std::result::Result<Option<CellAnimation>, String> {
        let animation_type: AnimationType =
            self.animation_type.parse().map_err(|e| format!("{e}"))?;
        if animation_type == AnimationType::None {
            return Ok(None);
        }
        Ok(Some(
            CellAnimation::new(animation_type, self.intensity, self.speed)
                .with_playing(self.is_playing),
        ))
    }
}

/// Serialized typography
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleData {
    pub font_size: f32,
    pub font_family: String,
    pub color: String,
    pub align: String,
    pub weight: u16,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
}

impl From<&TextCellStyle> for TextStyleData {
    fn from(style: &TextCellStyle) -> Self {
        Self {
            font_size: style.font_size,
            font_family: style.font_family.clone(),
            color: color_to_hex(style.color),
            align: align_str(style.align).to_string(),
            weight: style.weight.to_numeric(),
            italic: style.italic,
            underline: style.underline,
            highlight: style.highlight,
            highlight_color: Some(color_to_hex(style.highlight_color)),
        }
    }
}

impl TextStyleData {
    pub fn to_style(&self) -> std::result::Result<TextCellStyle, String> {
        let mut style = TextCellStyle {
            font_size: self.font_size,
            font_family: self.font_family.clone(),
            color: parse_color(&self.color)?,
            align: parse_align(&self.align)?,
            weight: FontWeight::from_numeric(self.weight),
            italic: self.italic,
            underline: self.underline,
            highlight: self.highlight,
            ..Default::default()
        };
        if let Some(color) = &self.highlight_color {
            style.highlight_color = parse_color(color)?;
        }
        Ok(style)
    }
}

/// Serialized content payload; which fields are set depends on `contentType`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyleData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_anchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_anchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl ContentData {
    fn from_content(content: &CellContent) -> Option<Self> {
        match content {
            CellContent::Empty => None,
            CellContent::Text(text) => Some(Self {
                text: Some(text.text.clone()),
                style: Some(TextStyleData::from(&text.style)),
                ..Default::default()
            }),
            CellContent::Image(image) => Some(Self {
                image_id: Some(image.image.id.0),
                image_width: Some(image.image.width),
                image_height: Some(image.image.height),
                scale: Some(image.scale),
                rotation: Some(image.rotation),
                padding: Some(image.padding),
                h_anchor: Some(image.h_anchor.as_str().to_string()),
                v_anchor: Some(image.v_anchor.as_str().to_string()),
                ..Default::default()
            }),
            CellContent::Mask(mask) => Some(Self {
                opacity: Some(mask.opacity),
                padding: Some(mask.padding),
                ..Default::default()
            }),
        }
    }

    fn to_content(
        content_type: ContentType,
        data: Option<&ContentData>,
    ) -> std::result::Result<CellContent, String> {
        let fallback = ContentData::default();
        let data = data.unwrap_or(&fallback);

        match content_type {
            ContentType::Empty => Ok(CellContent::Empty),
            ContentType::Text => {
                let mut content = TextContent::new(data.text.clone().unwrap_or_default());
                if let Some(style) = &data.style {
                    content.style = style.to_style()?;
                }
                Ok(CellContent::Text(content))
            }
            ContentType::Image => {
                let (Some(id), Some(width), Some(height)) =
                    (data.image_id, data.image_width, data.image_height)
                else {
                    return Err("image content without an image handle".to_string());
                };
                let mut image = ImageContent::new(ImageHandle::new(ImageId(id), width, height));
                image.scale = data.scale.unwrap_or(image.scale);
                image.rotation = data.rotation.unwrap_or(image.rotation);
                image.padding = data.padding.unwrap_or(image.padding);
                if let Some(anchor) = &data.h_anchor {
                    image.h_anchor = HorizontalAnchor::parse(anchor)
                        .ok_or_else(|| format!("invalid horizontal anchor {anchor:?}"))?;
                }
                if let Some(anchor) = &data.v_anchor {
                    image.v_anchor = VerticalAnchor::parse(anchor)
                        .ok_or_else(|| format!("invalid vertical anchor {anchor:?}"))?;
                }
                Ok(CellContent::Image(image))
            }
            ContentType::Mask => {
                let mask = MaskContent {
                    opacity: data.opacity.unwrap_or(1.0),
                    padding: data.padding.unwrap_or(0.0),
                };
                Ok(CellContent::Mask(mask))
            }
        }
    }
}

/// One serialized cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub id: u32,
    pub content_id: String,
    pub row: usize,
    pub col: usize,
    #[serde(rename = "type")]
    pub cell_type: String,
    #[serde(default)]
    pub bounds: Option<BoundsData>,
    /// Written equal to `bounds`; only read when `bounds` is missing
    #[serde(default)]
    pub original_bounds: Option<BoundsData>,
    #[serde(default)]
    pub layer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_order: Option<i32>,
    #[serde(default)]
    pub animation: Option<AnimationData>,

    // Main-text cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyleData>,

    // Content cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
}

impl Cell {
    /// Serialized form of this cell. `layer_order` is left for the grid to fill.
    pub fn serialize(&self) -> CellData {
        let bounds = BoundsData::from(self.bounds());
        let mut data = CellData {
            id: self.id,
            content_id: self.content_id().to_string(),
            row: self.row,
            col: self.col,
            cell_type: self.cell_type().as_str().to_string(),
            bounds: Some(bounds),
            original_bounds: Some(bounds),
            layer_id: self.layer_id().to_string(),
            layer_order: None,
            animation: self.animation().map(AnimationData::from),
            text: None,
            line_index: None,
            style: None,
            content_type: None,
            content: None,
            fill_color: None,
        };

        match &self.kind {
            CellKind::MainText(cell) => {
                data.text = Some(cell.text.clone());
                data.line_index = Some(cell.line_index);
                data.style = Some(TextStyleData::from(&cell.style));
            }
            CellKind::Content(cell) => {
                data.content_type = Some(cell.content_type().as_str().to_string());
                data.content = ContentData::from_content(&cell.content);
                data.fill_color = Some(color_to_hex(cell.fill_color));
            }
        }

        data
    }

    /// Rebuild a cell from its serialized form
    ///
    /// The cell keeps the layer id it was saved with; layer membership is
    /// recorded when the cell is placed into a grid.
    pub fn deserialize(data: &CellData) -> Result<Cell> {
        let content_id = data.content_id.as_str();
        let invalid = |reason: String| GridError::cell_data(content_id, reason);

        let bounds: Rect = data
            .bounds
            .or(data.original_bounds)
            .ok_or_else(|| invalid("missing bounds".to_string()))?
            .into();
        if !bounds.is_finite() || bounds.width() < 0.0 || bounds.height() < 0.0 {
            return Err(invalid(format!("malformed bounds {bounds:?}")));
        }

        let cell_type = CellType::parse(&data.cell_type)
            .ok_or_else(|| invalid(format!("unknown cell type {:?}", data.cell_type)))?;

        let animation = match &data.animation {
            Some(animation) => animation.to_animation().map_err(invalid)?,
            None => None,
        };

        let kind = match cell_type {
            CellType::MainText => {
                let text = data
                    .text
                    .clone()
                    .ok_or_else(|| invalid("main-text cell without text".to_string()))?;
                if text.trim().is_empty() {
                    return Err(invalid("main-text cell with blank text".to_string()));
                }
                let style = match &data.style {
                    Some(style) => style.to_style().map_err(invalid)?,
                    None => TextCellStyle::default(),
                };
                CellKind::MainText(MainTextCell {
                    text,
                    line_index: data.line_index.unwrap_or(0),
                    style,
                })
            }
            CellType::Content => {
                let content_type = match &data.content_type {
                    Some(value) => value.parse::<ContentType>().map_err(invalid)?,
                    None => ContentType::Empty,
                };
                let content =
                    ContentData::to_content(content_type, data.content.as_ref()).map_err(invalid)?;
                let fill_color = match &data.fill_color {
                    Some(value) => parse_color(value).map_err(invalid)?,
                    None => Color::TRANSPARENT,
                };
                CellKind::Content(ContentCell {
                    content,
                    fill_color,
                })
            }
        };

        let layer_id = if data.layer_id.is_empty() {
            cell_type.default_layer().to_string()
        } else {
            data.layer_id.clone()
        };

        Ok(Cell::from_parts(
            data.row,
            data.col,
            data.id,
            data.content_id.clone(),
            bounds,
            layer_id,
            animation,
            kind,
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Grid Snapshot
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub version: String,
    pub snapshot_type: String,
}

impl SnapshotMetadata {
    pub fn now(snapshot_type: impl Into<String>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();
        Self {
            timestamp,
            version: SNAPSHOT_VERSION.to_string(),
            snapshot_type: snapshot_type.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridData {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellData>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasData {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub padding: PaddingData,
}

impl CanvasData {
    pub fn new(size: Size, padding: Padding) -> Self {
        Self {
            width: size.width,
            height: size.height,
            padding: padding.into(),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Layer definition as saved
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    pub id: String,
    pub name: String,
    pub order: i32,
    pub visible: bool,
}

/// Everything needed to put a grid back on screen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub metadata: SnapshotMetadata,
    #[serde(default)]
    pub grid: Option<GridData>,
    pub canvas: CanvasData,
    #[serde(default)]
    pub layers: Vec<LayerData>,
    /// Host configuration, stored verbatim
    #[serde(default)]
    pub config: serde_json::Value,
}

/// A reason a snapshot cannot be restored
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotIssue {
    #[error("snapshot has no grid data")]
    MissingGrid,

    #[error("canvas must have positive dimensions, got {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },

    #[error("grid dimensions {rows}x{cols} do not match its cells")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("{actual} cells do not fit a {rows}x{cols} matrix")]
    CellCountMismatch {
        rows: usize,
        cols: usize,
        actual: usize,
    },

    #[error("cell {content_id} at ({row}, {col}) lies outside the matrix")]
    CellOutOfBounds {
        content_id: String,
        row: usize,
        col: usize,
    },

    #[error("more than one cell at ({row}, {col})")]
    DuplicatePosition { row: usize, col: usize },

    #[error("more than one cell with content id {content_id}")]
    DuplicateContentId { content_id: String },

    #[error("cell {content_id} has no bounds")]
    MissingBounds { content_id: String },

    #[error("cell {content_id} has unknown type {value:?}")]
    UnknownCellType { content_id: String, value: String },

    #[error("cell {content_id} has unknown content type {value:?}")]
    UnknownContentType { content_id: String, value: String },

    #[error("cell {content_id} references unknown layer {layer_id:?}")]
    UnknownLayer {
        content_id: String,
        layer_id: String,
    },
}

impl GridSnapshot {
    /// Snapshot stamped with the current time
    pub fn new(
        canvas: CanvasData,
        grid: Option<GridData>,
        layers: Vec<LayerData>,
        config: serde_json::Value,
    ) -> Self {
        Self {
            metadata: SnapshotMetadata::now(GRID_SNAPSHOT_TYPE),
            grid,
            canvas,
            layers,
            config,
        }
    }

    /// Every problem that would stop a restore; empty when the snapshot is usable
    pub fn validate(&self) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();

        let (width, height) = (self.canvas.width, self.canvas.height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            issues.push(SnapshotIssue::InvalidCanvas { width, height });
        }

        let Some(grid) = &self.grid else {
            issues.push(SnapshotIssue::MissingGrid);
            return issues;
        };

        // Every row and column of a detected grid holds at least one cell, so
        // the cells bound the matrix size before anything is allocated.
        let max_row = grid.cells.iter().map(|cell| cell.row.saturating_add(1)).max();
        let max_col = grid.cells.iter().map(|cell| cell.col.saturating_add(1)).max();
        let oversized = grid.cols > MAX_COLUMNS
            || grid.rows > grid.cells.len()
            || grid.rows > max_row.unwrap_or(0)
            || grid.cols > max_col.unwrap_or(0);

        match grid.rows.checked_mul(grid.cols) {
            Some(capacity) if !oversized => {
                if grid.cells.len() > capacity {
                    issues.push(SnapshotIssue::CellCountMismatch {
                        rows: grid.rows,
                        cols: grid.cols,
                        actual: grid.cells.len(),
                    });
                }
            }
            _ => issues.push(SnapshotIssue::InvalidDimensions {
                rows: grid.rows,
                cols: grid.cols,
            }),
        }

        let known_layers: FxHashSet<&str> = DEFAULT_LAYERS
            .iter()
            .map(|(id, _, _)| *id)
            .chain(self.layers.iter().map(|layer| layer.id.as_str()))
            .collect();
        let mut positions = FxHashSet::default();
        let mut content_ids = FxHashSet::default();

        for cell in &grid.cells {
            if cell.row >= grid.rows || cell.col >= grid.cols {
                issues.push(SnapshotIssue::CellOutOfBounds {
                    content_id: cell.content_id.clone(),
                    row: cell.row,
                    col: cell.col,
                });
            }
            if !positions.insert((cell.row, cell.col)) {
                issues.push(SnapshotIssue::DuplicatePosition {
                    row: cell.row,
                    col: cell.col,
                });
            }
            if !content_ids.insert(cell.content_id.as_str()) {
                issues.push(SnapshotIssue::DuplicateContentId {
                    content_id: cell.content_id.clone(),
                });
            }
            if cell.bounds.is_none() && cell.original_bounds.is_none() {
                issues.push(SnapshotIssue::MissingBounds {
                    content_id: cell.content_id.clone(),
                });
            }
            if CellType::parse(&cell.cell_type).is_none() {
                issues.push(SnapshotIssue::UnknownCellType {
                    content_id: cell.content_id.clone(),
                    value: cell.cell_type.clone(),
                });
            }
            if let Some(value) = &cell.content_type {
                if value.parse::<ContentType>().is_err() {
                    issues.push(SnapshotIssue::UnknownContentType {
                        content_id: cell.content_id.clone(),
                        value: value.clone(),
                    });
                }
            }
            if !cell.layer_id.is_empty() && !known_layers.contains(cell.layer_id.as_str()) {
                issues.push(SnapshotIssue::UnknownLayer {
                    content_id: cell.content_id.clone(),
                    layer_id: cell.layer_id.clone(),
                });
            }
        }

        issues
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text_cell() -> Cell {
        let mut cell = Cell::main_text(
            1,
            1,
            Rect::new(300.0, 100.0, 200.0, 60.0),
            "HELLO",
            0,
            TextCellStyle::new(48.0)
                .with_color(Color::from_hex(0x336699))
                .with_underline(true),
        );
        cell.id = 5;
        cell.set_animation(AnimationType::Sway, 20.0, 1.5);
        cell.play_animation();
        cell
    }

    fn sample_image_cell() -> Cell {
        let mut cell = Cell::content(1, 2, Rect::new(500.0, 100.0, 280.0, 60.0), "c-7");
        cell.id = 6;
        cell.set_content(CellContent::Image(
            ImageContent::new(ImageHandle::new(ImageId(42), 640.0, 480.0))
                .with_scale(0.8)
                .with_rotation(15.0)
                .with_padding(4.0)
                .with_anchor(HorizontalAnchor::Right, VerticalAnchor::Top),
        ));
        if let Some(content) = cell.as_content_mut() {
            content.fill_color = Color::from_hex(0xeeeeee);
        }
        cell
    }

    #[test]
    fn test_text_cell_round_trip() {
        let cell = sample_text_cell();
        let restored = Cell::deserialize(&cell.serialize()).unwrap();

        assert_eq!(restored.bounds(), cell.bounds());
        assert_eq!(restored.cell_type(), CellType::MainText);
        assert_eq!(restored.layer_id(), cell.layer_id());
        assert_eq!(restored.content_id(), cell.content_id());
        assert_eq!(restored.animation(), cell.animation());
        assert_eq!(restored.as_main_text(), cell.as_main_text());
    }

    #[test]
    fn test_content_cell_round_trip() {
        let cell = sample_image_cell();
        let restored = Cell::deserialize(&cell.serialize()).unwrap();

        assert_eq!(restored.bounds(), cell.bounds());
        assert_eq!(restored.kind, cell.kind);
        assert_eq!(restored.layer_id(), cell.layer_id());
        assert!(restored.animation().is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(sample_text_cell().serialize()).unwrap();
        for key in [
            "id",
            "contentId",
            "row",
            "col",
            "type",
            "bounds",
            "originalBounds",
            "layerId",
            "animation",
            "text",
            "lineIndex",
            "style",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["type"], "main-text");
        assert_eq!(json["animation"]["isPlaying"], true);
        assert_eq!(json["animation"]["type"], "sway");
        assert_eq!(json["bounds"], json["originalBounds"]);

        let json = serde_json::to_value(sample_image_cell().serialize()).unwrap();
        assert_eq!(json["contentType"], "image");
        assert_eq!(json["fillColor"], "#eeeeeeff");
        assert_eq!(json["content"]["hAnchor"], "right");
    }

    #[test]
    fn test_original_bounds_used_when_bounds_missing() {
        let mut data = sample_image_cell().serialize();
        data.original_bounds = Some(BoundsData::from(Rect::new(1.0, 2.0, 3.0, 4.0)));
        let restored = Cell::deserialize(&data).unwrap();
        assert_eq!(restored.bounds(), Rect::new(500.0, 100.0, 280.0, 60.0));

        data.bounds = None;
        let restored = Cell::deserialize(&data).unwrap();
        assert_eq!(restored.bounds(), Rect::new(1.0, 2.0, 3.0, 4.0));

        data.original_bounds = None;
        assert!(matches!(
            Cell::deserialize(&data),
            Err(GridError::InvalidCellData { .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_bad_data() {
        let mut data = sample_text_cell().serialize();
        data.cell_type = "sidebar".to_string();
        assert!(Cell::deserialize(&data).is_err());

        let mut data = sample_image_cell().serialize();
        data.fill_color = Some("not-a-color".to_string());
        assert!(Cell::deserialize(&data).is_err());

        let mut data = sample_text_cell().serialize();
        if let Some(animation) = &mut data.animation {
            animation.animation_type = "wobble".to_string();
        }
        assert!(Cell::deserialize(&data).is_err());
    }

    #[test]
    fn test_deserialize_rejects_blank_main_text() {
        for text in ["", "  \t"] {
            let mut data = sample_text_cell().serialize();
            data.text = Some(text.to_string());
            assert!(matches!(
                Cell::deserialize(&data),
                Err(GridError::InvalidCellData { .. })
            ));
        }
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(color_to_hex(Color::WHITE), "#ffffffff");
        assert_eq!(color_to_hex(Color::TRANSPARENT), "#00000000");
        assert_eq!(color_from_hex("#ff0000"), Some(Color::RED));
        assert_eq!(color_from_hex("00000000"), Some(Color::TRANSPARENT));
        assert_eq!(color_from_hex("#fff"), None);
        assert_eq!(color_from_hex("#zzzzzz"), None);

        let color = Color::from_hex(0x336699);
        assert_eq!(color_from_hex(&color_to_hex(color)), Some(color));
    }

    fn snapshot_with(cells: Vec<CellData>, rows: usize, cols: usize) -> GridSnapshot {
        GridSnapshot::new(
            CanvasData::new(Size::new(800.0, 600.0), Padding::uniform(20.0)),
            Some(GridData { rows, cols, cells }),
            Vec::new(),
            serde_json::json!({ "theme": "dark" }),
        )
    }

    #[test]
    fn test_valid_snapshot_has_no_issues() {
        let snapshot = snapshot_with(
            vec![sample_text_cell().serialize(), sample_image_cell().serialize()],
            2,
            3,
        );
        assert!(snapshot.is_valid());
        assert_eq!(snapshot.metadata.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.metadata.snapshot_type, GRID_SNAPSHOT_TYPE);
    }

    #[test]
    fn test_validate_reports_issues() {
        let mut stray = sample_image_cell().serialize();
        stray.row = 9;
        stray.layer_id = "nowhere".to_string();
        let duplicate = sample_image_cell().serialize();

        let mut snapshot = snapshot_with(vec![duplicate.clone(), duplicate, stray], 2, 3);
        snapshot.canvas.width = 0.0;

        let issues = snapshot.validate();
        assert!(issues.contains(&SnapshotIssue::InvalidCanvas {
            width: 0.0,
            height: 600.0
        }));
        assert!(issues.contains(&SnapshotIssue::DuplicatePosition { row: 1, col: 2 }));
        assert!(issues
            .iter()
            .any(|issue| matches!(issue, SnapshotIssue::CellOutOfBounds { row: 9, .. })));
        assert!(issues
            .iter()
            .any(|issue| matches!(issue, SnapshotIssue::UnknownLayer { .. })));
    }

    #[test]
    fn test_overflowing_dimensions_are_reported() {
        let snapshot = snapshot_with(
            vec![sample_text_cell().serialize(), sample_image_cell().serialize()],
            usize::MAX,
            2,
        );
        assert!(snapshot.validate().contains(&SnapshotIssue::InvalidDimensions {
            rows: usize::MAX,
            cols: 2
        }));
    }

    #[test]
    fn test_dimensions_larger_than_cells_are_reported() {
        let empty = snapshot_with(Vec::new(), usize::MAX / 2, 0);
        assert_eq!(
            empty.validate(),
            vec![SnapshotIssue::InvalidDimensions {
                rows: usize::MAX / 2,
                cols: 0
            }]
        );

        let cells = vec![sample_text_cell().serialize(), sample_image_cell().serialize()];
        let tall = snapshot_with(cells.clone(), 1_000_000, 3);
        assert!(tall
            .validate()
            .iter()
            .any(|issue| matches!(issue, SnapshotIssue::InvalidDimensions { .. })));

        let wide = snapshot_with(cells, 2, 40);
        assert!(wide
            .validate()
            .iter()
            .any(|issue| matches!(issue, SnapshotIssue::InvalidDimensions { .. })));
    }

    #[test]
    fn test_duplicate_content_id_is_reported() {
        let text = sample_text_cell().serialize();
        let mut image = sample_image_cell().serialize();
        image.content_id = text.content_id.clone();

        let snapshot = snapshot_with(vec![text.clone(), image], 2, 3);
        assert_eq!(
            snapshot.validate(),
            vec![SnapshotIssue::DuplicateContentId {
                content_id: text.content_id
            }]
        );
    }

    #[test]
    fn test_missing_grid() {
        let mut snapshot = snapshot_with(Vec::new(), 0, 0);
        snapshot.grid = None;
        assert_eq!(snapshot.validate(), vec![SnapshotIssue::MissingGrid]);
    }

    #[test]
    fn test_json_round_trip_keeps_config() {
        let snapshot = snapshot_with(vec![sample_text_cell().serialize()], 2, 3);
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"snapshotType\""));

        let parsed = GridSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed.config["theme"], "dark");
        assert_eq!(parsed.grid.map(|g| g.cells.len()), Some(1));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            GridSnapshot::from_json("{ not json"),
            Err(GridError::Json(_))
        ));
    }
}
