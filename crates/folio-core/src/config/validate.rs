//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.manifest_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "scan.manifest_file must not be empty".into(),
            ));
        }
        if self.scan.thumbnail_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "scan.thumbnail_dir must not be empty".into(),
            ));
        }
        if self.thumbnail.size == 0 {
            return Err(ConfigError::ValidationError(
                "thumbnail.size must be > 0".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnail.quality) {
            return Err(ConfigError::ValidationError(
                "thumbnail.quality must be between 1 and 100".into(),
            ));
        }
        if !(1..=100).contains(&self.compress.quality) {
            return Err(ConfigError::ValidationError(
                "compress.quality must be between 1 and 100".into(),
            ));
        }
        if self.compress.max_width == 0 || self.compress.max_height == 0 {
            return Err(ConfigError::ValidationError(
                "compress.max_width and compress.max_height must be > 0".into(),
            ));
        }
        Ok(())
    }
}
