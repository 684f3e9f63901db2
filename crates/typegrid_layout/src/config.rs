//! Grid configuration
//!
//! Detection settings live in a small TOML document:
//!
//! ```toml
//! min_cell_size = 60.0
//! debug = true
//!
//! [default_padding]
//! top = 20.0
//! right = 20.0
//! bottom = 20.0
//! left = 20.0
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use typegrid_core::Padding;

use crate::error::{GridError, Result};
use crate::snapshot::PaddingData;

/// Smallest content cell emitted by default, in pixels
pub const DEFAULT_MIN_CELL_SIZE: f32 = 50.0;

/// Lower bound for `min_cell_size`
pub const MIN_CELL_SIZE_FLOOR: f32 = 10.0;

/// Detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Content candidates narrower or shorter than this are dropped
    pub min_cell_size: f32,
    /// Keep a human-readable trace of each detection step
    pub debug: bool,
    /// Padding used when the host does not supply one
    pub default_padding: PaddingData,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_cell_size: DEFAULT_MIN_CELL_SIZE,
            debug: false,
            default_padding: PaddingData::default(),
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_cell_size(mut self, size: f32) -> Self {
        self.min_cell_size = size;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_default_padding(mut self, padding: Padding) -> Self {
        self.default_padding = padding.into();
        self
    }

    /// `min_cell_size` with the floor applied; non-finite values fall back to the default
    pub fn effective_min_cell_size(&self) -> f32 {
        if self.min_cell_size.is_finite() {
            self.min_cell_size.max(MIN_CELL_SIZE_FLOOR)
        } else {
            DEFAULT_MIN_CELL_SIZE
        }
    }

    pub fn default_padding(&self) -> Padding {
        self.default_padding.into()
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GridError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded grid config");
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GridError::Config(e.to_string()))
    }
}
