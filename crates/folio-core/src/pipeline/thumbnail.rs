//! Thumbnail generation into a side directory.

use std::path::{Path, PathBuf};

use crate::config::ThumbnailConfig;
use crate::error::{PipelineError, PipelineResult};

use super::encode;

/// Writes `thumb_<stem>.jpg` copies of source images.
pub struct ThumbnailGenerator {
    config: ThumbnailConfig,
    output_dir: PathBuf,
}

impl ThumbnailGenerator {
    /// Create a generator writing into `output_dir`.
    pub fn new(config: ThumbnailConfig, output_dir: PathBuf) -> Self {
        Self { config, output_dir }
    }

    /// Directory thumbnails are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if it is missing.
    pub fn ensure_output_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.output_dir)
    }

    /// Output path for a source image. Sources sharing a stem map to the
    /// same file.
    pub fn thumbnail_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        self.output_dir.join(format!("thumb_{stem}.jpg"))
    }

    /// Generate a thumbnail for `source`.
    ///
    /// Returns `None` if generation is disabled or fails; failures are logged.
    pub fn generate(&self, source: &Path) -> Option<PathBuf> {
        if !self.config.enabled {
            return None;
        }
        match self.try_generate(source) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Thumbnail skipped: {}", e);
                None
            }
        }
    }

    /// Generate a thumbnail, reporting why it failed.
    pub fn try_generate(&self, source: &Path) -> PipelineResult<PathBuf> {
        let image = encode::decode(source).map_err(|e| PipelineError::Decode {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let image = encode::to_jpeg_compatible(image);
        let thumbnail = encode::fit_within(image, self.config.size, self.config.size, None);

        let bytes = encode::encode_jpeg(&thumbnail, self.config.quality).map_err(|e| {
            PipelineError::Encode {
                path: source.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let output = self.thumbnail_path(source);
        std::fs::write(&output, bytes).map_err(|e| PipelineError::Write {
            path: output.clone(),
            source: e,
        })?;

        tracing::debug!("Thumbnail written: {:?}", output);
        Ok(output)
    }

    /// Check if thumbnail generation is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn default_generator(dir: &Path) -> ThumbnailGenerator {
        ThumbnailGenerator::new(ThumbnailConfig::default(), dir.join("thumbnails"))
    }

    #[test]
    fn test_thumbnail_fits_bounding_box() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("landscape.png");
        image::RgbImage::new(4000, 3000).save(&source).unwrap();

        let generator = default_generator(dir.path());
        generator.ensure_output_dir().unwrap();
        let output = generator.generate(&source).unwrap();

        assert_eq!(output, dir.path().join("thumbnails/thumb_landscape.jpg"));
        let thumb = image::open(&output).unwrap();
        let (w, h) = thumb.dimensions();
        assert!(w <= 300 && h <= 300);
        assert!((w as f64 / h as f64 - 4.0 / 3.0).abs() < 0.02);
    }

    #[test]
    fn test_alpha_source_becomes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("logo.png");
        image::RgbaImage::new(64, 32).save(&source).unwrap();

        let generator = default_generator(dir.path());
        generator.ensure_output_dir().unwrap();
        let output = generator.generate(&source).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        // Small sources are not upscaled
        assert_eq!(image::open(&output).unwrap().dimensions(), (64, 32));
    }

    #[test]
    fn test_thumbnail_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.png");
        image::RgbImage::new(10, 10).save(&source).unwrap();

        let config = ThumbnailConfig {
            enabled: false,
            ..ThumbnailConfig::default()
        };
        let generator = ThumbnailGenerator::new(config, dir.path().join("thumbnails"));
        assert!(generator.generate(&source).is_none());
        assert!(!generator.is_enabled());
    }

    #[test]
    fn test_corrupt_source_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.jpg");
        std::fs::write(&source, b"\xFF\xD8 truncated").unwrap();

        let generator = default_generator(dir.path());
        generator.ensure_output_dir().unwrap();
        assert!(generator.generate(&source).is_none());
        assert!(!generator.thumbnail_path(&source).exists());
    }

    #[test]
    fn test_thumbnail_path_uses_stem() {
        let generator = ThumbnailGenerator::new(ThumbnailConfig::default(), PathBuf::from("/t"));
        assert_eq!(
            generator.thumbnail_path(Path::new("albums/sunset.final.PNG")),
            PathBuf::from("/t/thumb_sunset.final.jpg")
        );
        assert_eq!(
            generator.thumbnail_path(Path::new("other/sunset.jpg")),
            generator.thumbnail_path(Path::new("albums/sunset.png"))
        );
    }
}
