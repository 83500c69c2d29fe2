/// Run settings parsing, defaults, and validation
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::constants::THEME_NONE;
use crate::palette::PaletteConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Run configuration loaded from `settings.json`.
/// Every key except `version` has an enumerated default.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Target game version recorded into the exported structure.
    pub version: String,
    /// Optional theme restricting the palette to a predefined allow-list.
    #[serde(default)]
    pub theme: Option<String>,
    /// Optional custom allow-list; takes priority over the theme.
    #[serde(default)]
    pub custom_blocks: Option<Vec<String>>,
    /// Per-category enable/disable map; disabling shrinks the palette.
    #[serde(default)]
    pub blocks_enabled: HashMap<String, bool>,
    /// Convert the skin to grayscale before matching.
    #[serde(default)]
    pub grayscale: bool,
    /// Output directory override.
    #[serde(default)]
    pub save_location: Option<PathBuf>,
}

impl Settings {
    /// Load and validate settings from a JSON file.
    /// A missing `version` key is a parse error, not a default.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The palette-facing slice of the settings.
    /// A theme of `"none"` or the empty string counts as no theme.
    pub fn palette_config(&self) -> PaletteConfig {
        let theme = self
            .theme
            .as_deref()
            .filter(|t| !t.is_empty() && *t != THEME_NONE)
            .map(str::to_string);

        PaletteConfig {
            theme,
            allow_list: self.custom_blocks.clone(),
            categories_enabled: self.blocks_enabled.clone(),
        }
    }
}
