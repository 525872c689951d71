//! Per-file metadata extraction into manifest records.

use chrono::{DateTime, Local};
use image::ImageFormat;
use std::path::{Component, Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};
use crate::types::ImageRecord;

use super::dimensions::DimensionReader;
use super::hash::Hasher;
use super::thumbnail::ThumbnailGenerator;

/// MIME type used when the extension is not recognized.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Builds an [`ImageRecord`] for one eligible file.
pub struct MetadataExtractor {
    root: PathBuf,
    dimensions: Box<dyn DimensionReader>,
    thumbnails: Option<ThumbnailGenerator>,
}

impl MetadataExtractor {
    /// Create an extractor for files under `root`.
    ///
    /// Thumbnails are only produced when a generator is supplied.
    pub fn new(
        root: PathBuf,
        dimensions: Box<dyn DimensionReader>,
        thumbnails: Option<ThumbnailGenerator>,
    ) -> Self {
        Self {
            root,
            dimensions,
            thumbnails,
        }
    }

    /// The thumbnail generator, if thumbnailing is enabled for this run.
    pub fn thumbnails(&self) -> Option<&ThumbnailGenerator> {
        self.thumbnails.as_ref()
    }

    /// Extract a record for `path`.
    ///
    /// Only a failed stat is an error. Hash, dimensions and thumbnail each
    /// degrade to an empty or absent field on their own.
    pub fn extract(&self, path: &Path) -> PipelineResult<ImageRecord> {
        let stat_err = |source| PipelineError::Stat {
            path: path.to_path_buf(),
            source,
        };
        let meta = std::fs::metadata(path).map_err(stat_err)?;
        let modified: DateTime<Local> = meta.modified().map_err(stat_err)?.into();
        let size_bytes = meta.len();

        let hash = Hasher::content_hash_or_empty(path);
        let mime_type = guess_mime_type(path);
        let dims = self.dimensions.read(path);

        let thumbnail = self
            .thumbnails
            .as_ref()
            .and_then(|generator| generator.generate(path))
            .map(|thumb| self.relative_path(&thumb));

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(ImageRecord {
            name,
            path: self.relative_path(path),
            thumbnail,
            size: format_size(size_bytes),
            size_bytes,
            modified_date: modified.format("%Y-%m-%d %H:%M").to_string(),
            modified_time: modified,
            hash,
            mime_type: mime_type.to_string(),
            width: dims.map(|d| d.width),
            height: dims.map(|d| d.height),
            aspect_ratio: dims.filter(|d| d.height != 0).map(|d| d.aspect_ratio),
        })
    }

    /// Path relative to the project root, `/`-separated.
    ///
    /// Paths outside the root are kept as given.
    pub fn relative_path(&self, path: &Path) -> String {
        to_forward_slash(path.strip_prefix(&self.root).unwrap_or(path))
    }
}

/// Join path components with `/` regardless of platform.
pub fn to_forward_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            Component::RootDir => Some("".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Format a byte count with base-1024 units and one decimal, e.g. "1.2MB".
pub fn format_size(size_bytes: u64) -> String {
    if size_bytes == 0 {
        return "0B".to_string();
    }
    let mut size = size_bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1}{}", size, SIZE_UNITS[unit])
}

/// Guess a MIME type from the file extension.
pub fn guess_mime_type(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(DEFAULT_MIME_TYPE)
}
