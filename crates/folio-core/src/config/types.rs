//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::pipeline::DimensionStrategy;

/// Directory scan and manifest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Manifest file name, written under the project root
    pub manifest_file: String,

    /// Thumbnail output directory, relative to the project root
    pub thumbnail_dir: String,

    /// How image dimensions are read
    pub dimensions: DimensionStrategy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            manifest_file: "images_data.json".to_string(),
            thumbnail_dir: "thumbnails".to_string(),
            dimensions: DimensionStrategy::Auto,
        }
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Whether to generate thumbnails during a scan
    pub enabled: bool,

    /// Bounding box edge in pixels (applies to both width and height)
    pub size: u32,

    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 300,
            quality: 85,
        }
    }
}

/// Recompression settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressConfig {
    /// JPEG quality (1-100)
    pub quality: u8,

    /// Images wider than this are downscaled
    pub max_width: u32,

    /// Images taller than this are downscaled
    pub max_height: u32,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            quality: 85,
            max_width: 1920,
            max_height: 1080,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
