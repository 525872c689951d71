//! Configuration management for Folio.
//!
//! Configuration is loaded from the platform config directory with defaults
//! for every field, so a missing or partial file is fine.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scan and manifest settings
    pub scan: ScanConfig,

    /// Thumbnail generation settings
    pub thumbnail: ThumbnailConfig,

    /// Recompression settings
    pub compress: CompressConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.folio.folio/config.toml
    /// - Linux: ~/.config/folio/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\folio\folio\config\config.toml
    ///
    /// Falls back to ~/.folio/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "folio", "folio")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".folio").join("config.toml")
            })
    }

    /// Resolve the thumbnail directory for a project root.
    ///
    /// `~` is expanded; relative values are joined onto `root`.
    pub fn thumbnail_dir(&self, root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&self.scan.thumbnail_dir);
        let dir = PathBuf::from(expanded.into_owned());
        if dir.is_absolute() {
            dir
        } else {
            root.join(dir)
        }
    }

    /// Resolve the manifest path for a project root.
    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.scan.manifest_file)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
