//! Importer configuration loaded from `~/.config/bento-import/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::block::GRID_COLUMNS;
use crate::import::ImportOptions;

/// Importer settings. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reject exports larger than this many bytes.
    pub max_file_bytes: Option<u64>,
    /// Max block span when building a persistence plan.
    pub grid_columns: i64,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_bytes: None,
            grid_columns: GRID_COLUMNS as i64,
            pretty: true,
        }
    }
}

impl Config {
    /// Load from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load from `path`, falling back to defaults when it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }

    /// Import options derived from this config.
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            max_file_bytes: self.max_file_bytes,
            mime: None,
        }
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bento-import")
        .join("config.toml")
}
