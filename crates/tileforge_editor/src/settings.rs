//! Editor settings
//!
//! Settings are stored as TOML in a platform-specific config directory:
//! - Linux: ~/.config/tileforge/settings.toml
//! - macOS: ~/Library/Application Support/tileforge/settings.toml
//! - Windows: %APPDATA%/tileforge/config/settings.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tileforge_core::GridSettings;

use crate::commands::DEFAULT_MAX_COMMANDS;

/// File name of the settings file inside the config directory
pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Settings that persist across editor sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Version for future migrations
    pub version: u32,
    /// Capacity of the undo and redo stacks
    pub max_commands: usize,
    /// Tile set loaded on startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tile_set: Option<PathBuf>,
    /// Settings for newly created grids
    pub grid: GridSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            version: 1,
            max_commands: DEFAULT_MAX_COMMANDS,
            default_tile_set: None,
            grid: GridSettings::default(),
        }
    }
}

impl EditorSettings {
    /// Read settings from a TOML file. Missing keys take their default value.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Read settings, falling back to defaults if the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings to a TOML file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Location of the settings file in the platform config directory.
    /// Falls back to `.tileforge/settings.toml` when no home directory is known.
    pub fn default_path() -> PathBuf {
        match directories::ProjectDirs::from("", "", "tileforge") {
            Some(dirs) => dirs.config_dir().join(SETTINGS_FILE),
            None => PathBuf::from(".tileforge").join(SETTINGS_FILE),
        }
    }
}
