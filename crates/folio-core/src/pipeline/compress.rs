//! Recompression of photos for upload: downscale to a bounding box and
//! re-encode as JPEG.

use image::imageops::FilterType;
use image::GenericImageView;
use std::path::{Path, PathBuf};

use crate::config::CompressConfig;
use crate::error::{PipelineError, PipelineResult};

use super::encode;

/// Extensions picked up by [`ImageCompressor::discover`].
pub const COMPRESSIBLE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// Compressed output above this total should be uploaded in batches.
pub const UPLOAD_BUDGET_BYTES: u64 = 500 * 1024 * 1024;

/// Outcome of compressing one file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    pub original_dimensions: (u32, u32),
    pub compressed_dimensions: (u32, u32),
}

impl CompressionResult {
    /// Percentage saved; negative when the output grew.
    pub fn compression_ratio(&self) -> f64 {
        saved_percent(self.original_size, self.compressed_size)
    }
}

/// Totals for a directory run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionSummary {
    pub total_files: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub original_bytes: u64,
    pub compressed_bytes: u64,
}

impl CompressionSummary {
    /// Record a successful file.
    pub fn add(&mut self, result: &CompressionResult) {
        self.succeeded += 1;
        self.original_bytes += result.original_size;
        self.compressed_bytes += result.compressed_size;
    }

    /// Percentage saved over all successful files.
    pub fn compression_ratio(&self) -> f64 {
        saved_percent(self.original_bytes, self.compressed_bytes)
    }

    /// Whether the compressed total is too large for a single upload.
    pub fn exceeds_upload_budget(&self) -> bool {
        self.compressed_bytes > UPLOAD_BUDGET_BYTES
    }
}

fn saved_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

/// Downscales and re-encodes images as JPEG.
pub struct ImageCompressor {
    config: CompressConfig,
}

impl ImageCompressor {
    /// Create a compressor with the given settings.
    pub fn new(config: CompressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressConfig {
        &self.config
    }

    /// Compress one image into `output`, or over the input when `None`.
    ///
    /// The output is always JPEG data, whatever its file name says.
    pub fn compress_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> PipelineResult<CompressionResult> {
        let original_size = std::fs::metadata(input)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PipelineError::InputNotFound(input.to_path_buf())
                } else {
                    PipelineError::Stat {
                        path: input.to_path_buf(),
                        source: e,
                    }
                }
            })?
            .len();

        let image = encode::decode(input).map_err(|e| PipelineError::Decode {
            path: input.to_path_buf(),
            message: e.to_string(),
        })?;
        let original_dimensions = image.dimensions();

        let image = encode::to_jpeg_compatible(image);
        let image = encode::fit_within(
            image,
            self.config.max_width,
            self.config.max_height,
            Some(FilterType::Lanczos3),
        );
        let compressed_dimensions = image.dimensions();

        let bytes = encode::encode_jpeg(&image, self.config.quality).map_err(|e| {
            PipelineError::Encode {
                path: input.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let output = output.unwrap_or(input).to_path_buf();
        std::fs::write(&output, &bytes).map_err(|e| PipelineError::Write {
            path: output.clone(),
            source: e,
        })?;

        tracing::debug!(
            "Compressed {:?}: {}x{} -> {}x{}",
            input,
            original_dimensions.0,
            original_dimensions.1,
            compressed_dimensions.0,
            compressed_dimensions.1
        );

        Ok(CompressionResult {
            input: input.to_path_buf(),
            output,
            original_size,
            compressed_size: bytes.len() as u64,
            original_dimensions,
            compressed_dimensions,
        })
    }

    /// List compressible images directly inside `dir` (not recursive).
    pub fn discover(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PipelineError::InputNotFound(dir.to_path_buf())
            } else {
                PipelineError::Stat {
                    path: dir.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_compressible(path))
            .collect();
        files.sort();
        Ok(files)
    }

    /// Compress every image in `input_dir`.
    ///
    /// Outputs keep their file names inside `output_dir`, which is created if
    /// needed; without one, files are compressed in place. `on_file` is called
    /// after each file with its outcome.
    pub fn compress_directory<F>(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
        mut on_file: F,
    ) -> PipelineResult<CompressionSummary>
    where
        F: FnMut(&Path, &PipelineResult<CompressionResult>),
    {
        let files = Self::discover(input_dir)?;
        if let Some(dir) = output_dir {
            std::fs::create_dir_all(dir).map_err(|e| PipelineError::Write {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let mut summary = CompressionSummary {
            total_files: files.len(),
            ..CompressionSummary::default()
        };

        for file in &files {
            let target = output_dir.and_then(|dir| file.file_name().map(|name| dir.join(name)));
            let result = self.compress_file(file, target.as_deref());
            match &result {
                Ok(done) => summary.add(done),
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!("Compression failed: {}", e);
                }
            }
            on_file(file, &result);
        }

        Ok(summary)
    }
}

/// Check if a file has an extension in [`COMPRESSIBLE_EXTENSIONS`].
pub fn is_compressible(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| COMPRESSIBLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> image::RgbImage {
        image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    #[test]
    fn test_downscales_to_bounding_box() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("big.png");
        gradient(3840, 1600).save(&input).unwrap();
        let output = dir.path().join("big_small.jpg");

        let compressor = ImageCompressor::new(CompressConfig::default());
        let result = compressor.compress_file(&input, Some(&output)).unwrap();

        assert_eq!(result.original_dimensions, (3840, 1600));
        let (w, h) = result.compressed_dimensions;
        assert!(w <= 1920 && h <= 1080);
        assert_eq!(w, 1920);
        assert_eq!(image::open(&output).unwrap().dimensions(), (w, h));
        assert_eq!(result.compressed_size, std::fs::metadata(&output).unwrap().len());
        // Input is untouched when an output path is given
        assert_eq!(result.original_size, std::fs::metadata(&input).unwrap().len());
    }

    #[test]
    fn test_small_image_not_upscaled_and_overwritten_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("small.jpg");
        gradient(64, 48).save(&input).unwrap();

        let compressor = ImageCompressor::new(CompressConfig::default());
        let result = compressor.compress_file(&input, None).unwrap();

        assert_eq!(result.output, input);
        assert_eq!(result.compressed_dimensions, (64, 48));
        let bytes = std::fs::read(&input).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_missing_input() {
        let compressor = ImageCompressor::new(CompressConfig::default());
        let err = compressor
            .compress_file(Path::new("/nonexistent/photo.jpg"), None)
            .unwrap_err();
        assert!(matches!(err, PipelineError::InputNotFound(_)));

        let err = ImageCompressor::discover(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, PipelineError::InputNotFound(_)));
    }

    #[test]
    fn test_directory_run_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        gradient(32, 32).save(dir.path().join("a.png")).unwrap();
        gradient(32, 32).save(dir.path().join("b.JPG")).unwrap();
        std::fs::write(dir.path().join("c.jpeg"), b"broken").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();
        // gif is scanned by the manifest builder but not recompressed
        std::fs::write(dir.path().join("d.gif"), b"GIF89a").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        gradient(8, 8).save(dir.path().join("nested/e.png")).unwrap();

        let out = dir.path().join("out");
        let compressor = ImageCompressor::new(CompressConfig::default());
        let mut seen = Vec::new();
        let summary = compressor
            .compress_directory(dir.path(), Some(&out), |path, _| {
                seen.push(path.file_name().unwrap().to_string_lossy().into_owned())
            })
            .unwrap();

        assert_eq!(seen, ["a.png", "b.JPG", "c.jpeg"]);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(out.join("a.png").exists());
        assert!(out.join("b.JPG").exists());
        assert!(!out.join("c.jpeg").exists());
    }

    #[test]
    fn test_ratios() {
        let result = CompressionResult {
            input: PathBuf::from("a.jpg"),
            output: PathBuf::from("a.jpg"),
            original_size: 1000,
            compressed_size: 250,
            original_dimensions: (10, 10),
            compressed_dimensions: (10, 10),
        };
        assert_eq!(result.compression_ratio(), 75.0);

        let mut summary = CompressionSummary::default();
        assert_eq!(summary.compression_ratio(), 0.0);
        summary.add(&result);
        summary.add(&result);
        assert_eq!(summary.original_bytes, 2000);
        assert_eq!(summary.compressed_bytes, 500);
        assert_eq!(summary.compression_ratio(), 75.0);
        assert!(!summary.exceeds_upload_budget());

        summary.compressed_bytes = UPLOAD_BUDGET_BYTES + 1;
        assert!(summary.exceeds_upload_budget());
    }
}
