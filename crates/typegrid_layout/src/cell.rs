//! Cell model
//!
//! A [`Cell`] is one slot of the grid matrix. Its geometry is fixed when the
//! grid is built; everything that moves or changes afterwards (animation
//! offset, content, layer) lives alongside it.
//!
//! Cells come in two kinds:
//!
//! - [`MainTextCell`]: one line of the main text, with its own typography
//! - [`ContentCell`]: the space around the text, holding an image, secondary
//!   text, a background mask, or nothing
//!
//! Layer assignment is read-only here. Moving a cell between layers goes
//! through [`LayerManager`](crate::layers::LayerManager) so the layer's member
//! set and the cell's `layer_id` never disagree.

use typegrid_animation::{AnimationState, AnimationType, CellAnimation};
use typegrid_core::{Color, Rect, Vec2};

use crate::content::{CellContent, ContentType};
use crate::identity::text_content_id;
use crate::layers::{BEHIND_MAIN_TEXT_LAYER, MAIN_TEXT_LAYER};
use crate::typography::TextCellStyle;

/// Kind of cell, as written to snapshots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellType {
    MainText,
    Content,
}

impl CellType {
    pub fn as_str(self) -> &'static str {
        match self {
            CellType::MainText => "main-text",
            CellType::Content => "content",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "main-text" => Some(CellType::MainText),
            "content" => Some(CellType::Content),
            _ => None,
        }
    }

    /// Layer a freshly built cell of this kind joins
    pub fn default_layer(self) -> &'static str {
        match self {
            CellType::MainText => MAIN_TEXT_LAYER,
            CellType::Content => BEHIND_MAIN_TEXT_LAYER,
        }
    }
}

/// One line of the main text
#[derive(Clone, Debug, PartialEq)]
pub struct MainTextCell {
    pub text: String,
    /// Position of the line within the full multi-line text
    pub line_index: usize,
    pub style: TextCellStyle,
}

/// Space around the main text
#[derive(Clone, Debug, PartialEq)]
pub struct ContentCell {
    pub content: CellContent,
    /// Placeholder fill drawn when there is no content
    pub fill_color: Color,
}

impl Default for ContentCell {
    fn default() -> Self {
        Self {
            content: CellContent::Empty,
            fill_color: Color::TRANSPARENT,
        }
    }
}

impl ContentCell {
    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CellKind {
    MainText(MainTextCell),
    Content(ContentCell),
}

/// A slot of the grid matrix
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Matrix row, zero-based
    pub row: usize,
    /// Matrix column, zero-based
    pub col: usize,
    /// Row-major display number, stable only within one build
    pub id: u32,
    content_id: String,
    bounds: Rect,
    pub(crate) layer_id: String,
    animation: Option<CellAnimation>,
    current_offset: Vec2,
    pub kind: CellKind,
}

impl Cell {
    /// Main-text cell with a content-derived id
    pub fn main_text(
        row: usize,
        col: usize,
        bounds: Rect,
        text: impl Into<String>,
        line_index: usize,
        style: TextCellStyle,
    ) -> Self {
        let text = text.into();
        Self {
            row,
            col,
            id: 0,
            content_id: text_content_id(&text, line_index),
            bounds,
            layer_id: CellType::MainText.default_layer().to_string(),
            animation: None,
            current_offset: Vec2::ZERO,
            kind: CellKind::MainText(MainTextCell {
                text,
                line_index,
                style,
            }),
        }
    }

    /// Empty content cell with the given id
    pub fn content(row: usize, col: usize, bounds: Rect, content_id: impl Into<String>) -> Self {
        Self {
            row,
            col,
            id: 0,
            content_id: content_id.into(),
            bounds,
            layer_id: CellType::Content.default_layer().to_string(),
            animation: None,
            current_offset: Vec2::ZERO,
            kind: CellKind::Content(ContentCell::default()),
        }
    }

    /// Assemble a cell from already-validated parts
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        row: usize,
        col: usize,
        id: u32,
        content_id: String,
        bounds: Rect,
        layer_id: String,
        animation: Option<CellAnimation>,
        kind: CellKind,
    ) -> Self {
        Self {
            row,
            col,
            id,
            content_id,
            bounds,
            layer_id,
            animation,
            current_offset: Vec2::ZERO,
            kind,
        }
    }

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn cell_type(&self) -> CellType {
        match self.kind {
            CellKind::MainText(_) => CellType::MainText,
            CellKind::Content(_) => CellType::Content,
        }
    }

    pub fn is_main_text(&self) -> bool {
        matches!(self.kind, CellKind::MainText(_))
    }

    /// Geometry fixed at build time
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Bounds shifted by the current animation offset
    pub fn effective_bounds(&self) -> Rect {
        self.bounds
            .offset(self.current_offset.x, self.current_offset.y)
    }

    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    pub fn current_offset(&self) -> Vec2 {
        self.current_offset
    }

    pub fn as_main_text(&self) -> Option<&MainTextCell> {
        match &self.kind {
            CellKind::MainText(cell) => Some(cell),
            CellKind::Content(_) => None,
        }
    }

    pub fn as_main_text_mut(&mut self) -> Option<&mut MainTextCell> {
        match &mut self.kind {
            CellKind::MainText(cell) => Some(cell),
            CellKind::Content(_) => None,
        }
    }

    pub fn as_content(&self) -> Option<&ContentCell> {
        match &self.kind {
            CellKind::Content(cell) => Some(cell),
            CellKind::MainText(_) => None,
        }
    }

    pub fn as_content_mut(&mut self) -> Option<&mut ContentCell> {
        match &mut self.kind {
            CellKind::Content(cell) => Some(cell),
            CellKind::MainText(_) => None,
        }
    }

    /// Replace the content of a content cell. Returns false for text cells.
    pub fn set_content(&mut self, content: CellContent) -> bool {
        match self.as_content_mut() {
            Some(cell) => {
                cell.content = content;
                true
            }
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Animation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn animation(&self) -> Option<&CellAnimation> {
        self.animation.as_ref()
    }

    pub fn animation_mut(&mut self) -> Option<&mut CellAnimation> {
        self.animation.as_mut()
    }

    pub fn animation_state(&self) -> AnimationState {
        AnimationState::of(self.animation.as_ref())
    }

    /// Attach a stopped animation, replacing any existing one
    ///
    /// `AnimationType::None` removes the animation. Non-finite parameters are
    /// rejected and leave the cell unchanged.
    pub fn set_animation(&mut self, animation_type: AnimationType, intensity: f32, speed: f32) -> bool {
        if !intensity.is_finite() || !speed.is_finite() {
            tracing::warn!(
                content_id = %self.content_id,
                intensity,
                speed,
                "rejecting animation with non-finite parameters"
            );
            return false;
        }

        if animation_type == AnimationType::None {
            self.remove_animation();
            return true;
        }

        self.animation = Some(CellAnimation::new(animation_type, intensity, speed));
        self.current_offset = Vec2::ZERO;
        true
    }

    pub fn remove_animation(&mut self) {
        self.animation = None;
        self.current_offset = Vec2::ZERO;
    }

    /// Returns false when there is nothing to play
    pub fn play_animation(&mut self) -> bool {
        match &mut self.animation {
            Some(animation) => {
                animation.play();
                true
            }
            None => false,
        }
    }

    pub fn pause_animation(&mut self) -> bool {
        match &mut self.animation {
            Some(animation) => {
                animation.pause();
                self.current_offset = Vec2::ZERO;
                true
            }
            None => false,
        }
    }

    /// Advance the animation and refresh the visual offset
    pub fn tick(&mut self, dt: f32) -> Vec2 {
        self.current_offset = match &mut self.animation {
            Some(animation) => animation.tick(dt),
            None => Vec2::ZERO,
        };
        self.current_offset
    }

    pub(crate) fn set_content_id(&mut self, content_id: impl Into<String>) {
        self.content_id = content_id.into();
    }

    /// Take over user configuration from the same cell of a previous build
    ///
    /// Geometry, position, display id, and content id stay as built; the grid
    /// decides separately whether a content cell keeps its old content id.
    pub(crate) fn inherit_from(&mut self, previous: &Cell) {
        self.layer_id = previous.layer_id.clone();
        self.animation = previous.animation.clone();
        self.current_offset = previous
            .animation
            .as_ref()
            .map(CellAnimation::offset)
            .unwrap_or(Vec2::ZERO);

        match (&mut self.kind, &previous.kind) {
            (CellKind::MainText(cell), CellKind::MainText(old)) => {
                cell.style = old.style.clone();
            }
            (CellKind::Content(cell), CellKind::Content(old)) => {
                cell.content = old.content.clone();
                cell.fill_color = old.fill_color;
            }
            _ => {}
        }
    }
}
