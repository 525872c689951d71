//! Folio Core - image manifest and recompression library for photo sites.
//!
//! A scan walks a project directory, builds one record per source image
//! (size, modification time, content hash, MIME type, dimensions and an
//! optional thumbnail) and writes the records as a JSON manifest for the
//! site's gallery page:
//!
//! ```text
//! Walk → Classify → Stat/Hash/Dimensions/Thumbnail → Sort → images_data.json
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use folio_core::{Config, Scanner};
//!
//! fn main() -> folio_core::Result<()> {
//!     let config = Config::load()?;
//!     let scanner = Scanner::new(std::path::Path::new("."), &config)?;
//!     let outcome = scanner.run()?;
//!     println!("{} images", outcome.manifest.total_images);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, FolioError, PipelineError, PipelineResult, Result};
pub use pipeline::{
    format_size, CompressionResult, CompressionSummary, DimensionStrategy, ImageCompressor,
    ScanOutcome, Scanner,
};
pub use types::{Dimensions, ImageRecord, Manifest};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
