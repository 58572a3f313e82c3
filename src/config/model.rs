// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::graph::layout::{
    DEFAULT_HORIZONTAL_SPACING, DEFAULT_LEVEL_SPACING, DEFAULT_SLOTS_PER_ROW,
};
use crate::types::StorageMode;

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [layout]
/// slots_per_row = 5
/// horizontal_spacing = 250.0
/// level_spacing = 150.0
///
/// [catalog]
/// path = "data/bio_data.json"
/// major = "BSCI"
///
/// [progress]
/// storage = "file"
/// path = ".coursedag/completed.json"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub layout: LayoutSection,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub progress: ProgressSection,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub layout: LayoutSection,
    pub catalog: CatalogSection,
    pub progress: ProgressSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        layout: LayoutSection,
        catalog: CatalogSection,
        progress: ProgressSection,
    ) -> Self {
        Self {
            layout,
            catalog,
            progress,
        }
    }
}

/// `[layout]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    /// Nodes per row inside one level before wrapping. Must be >= 1.
    #[serde(default = "default_slots_per_row")]
    pub slots_per_row: usize,

    #[serde(default = "default_horizontal_spacing")]
    pub horizontal_spacing: f64,

    /// Vertical distance between rows; a level band starts at
    /// `level * 2 * level_spacing` unless the previous level needs more room.
    #[serde(default = "default_level_spacing")]
    pub level_spacing: f64,

    /// Regex extracting the nominal level from a course id.
    ///
    /// The first capture group (or the whole match) must be an integer. If
    /// `None`, the first digit of the id is used.
    #[serde(default)]
    pub level_pattern: Option<String>,
}

fn default_slots_per_row() -> usize {
    DEFAULT_SLOTS_PER_ROW
}

fn default_horizontal_spacing() -> f64 {
    DEFAULT_HORIZONTAL_SPACING
}

fn default_level_spacing() -> f64 {
    DEFAULT_LEVEL_SPACING
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            slots_per_row: default_slots_per_row(),
            horizontal_spacing: default_horizontal_spacing(),
            level_spacing: default_level_spacing(),
            level_pattern: None,
        }
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    /// Catalog JSON file. Relative paths resolve against the config file's
    /// directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Only keep courses of this subject.
    #[serde(default)]
    pub major: Option<String>,
}

/// `[progress]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressSection {
    #[serde(default)]
    pub storage: StorageMode,

    /// File used when `storage = "file"`.
    #[serde(default = "default_progress_path")]
    pub path: PathBuf,
}

fn default_progress_path() -> PathBuf {
    PathBuf::from(".coursedag/completed.json")
}

impl Default for ProgressSection {
    fn default() -> Self {
        Self {
            storage: StorageMode::default(),
            path: default_progress_path(),
        }
    }
}
