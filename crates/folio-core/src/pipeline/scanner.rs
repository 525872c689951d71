//! Manifest builder: walks the project tree and aggregates records.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult, Result};
use crate::manifest::write_manifest;
use crate::types::{ImageRecord, Manifest};

use super::classify::FileClassifier;
use super::metadata::MetadataExtractor;
use super::thumbnail::ThumbnailGenerator;

/// Records collected by one scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Records, most recently modified first
    pub records: Vec<ImageRecord>,
    /// Eligible files dropped because they could not be stat'ed
    pub failed: usize,
}

/// Result of a scan that was persisted to disk.
#[derive(Debug)]
pub struct ScanOutcome {
    pub manifest: Manifest,
    pub manifest_path: PathBuf,
    pub failed: usize,
}

/// Scans a project directory and builds its image manifest.
pub struct Scanner {
    root: PathBuf,
    manifest_path: PathBuf,
    classifier: FileClassifier,
    extractor: MetadataExtractor,
}

impl Scanner {
    /// Create a scanner for `root` using `config`.
    ///
    /// The dimension strategy is chosen here, once for the whole run.
    /// Thumbnails are produced only when enabled and the strategy can decode.
    pub fn new(root: &Path, config: &Config) -> PipelineResult<Self> {
        let root = std::fs::canonicalize(root)
            .ok()
            .filter(|p| p.is_dir())
            .ok_or_else(|| PipelineError::ProjectRootNotFound(root.to_path_buf()))?;

        let thumbnail_dir = config.thumbnail_dir(&root);
        let strategy = config.scan.dimensions;
        let thumbnails = (config.thumbnail.enabled && strategy.can_decode())
            .then(|| ThumbnailGenerator::new(config.thumbnail.clone(), thumbnail_dir.clone()));

        let dimensions = strategy.reader();
        tracing::debug!(
            "Scanner for {:?}: dimensions={}, thumbnails={}",
            root,
            dimensions.name(),
            thumbnails.is_some()
        );

        Ok(Self {
            manifest_path: config.manifest_path(&root),
            classifier: FileClassifier::new(&root, Some(&thumbnail_dir)),
            extractor: MetadataExtractor::new(root.clone(), dimensions, thumbnails),
            root,
        })
    }

    /// Canonical project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where [`Scanner::run`] writes the manifest.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Whether this scanner generates thumbnails.
    pub fn thumbnails_enabled(&self) -> bool {
        self.extractor.thumbnails().is_some()
    }

    /// Find every eligible image under the root, in traversal order.
    ///
    /// Hidden, reserved and thumbnail directories are not descended.
    pub fn discover(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || self.classifier.should_descend(self.relative(entry.path()))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if self
                .classifier
                .classify(self.relative(path), path.is_file())
                .is_eligible()
            {
                files.push(path.to_path_buf());
            }
        }

        files
    }

    /// Scan the tree and return sorted records.
    pub fn scan(&self) -> ScanReport {
        self.scan_with_progress(|_| {})
    }

    /// Scan the tree, calling `on_file` after each eligible file.
    ///
    /// Creates the thumbnail directory first when thumbnails are enabled.
    pub fn scan_with_progress<F: FnMut(&Path)>(&self, mut on_file: F) -> ScanReport {
        if let Some(thumbnails) = self.extractor.thumbnails() {
            if let Err(e) = thumbnails.ensure_output_dir() {
                tracing::warn!(
                    "Cannot create thumbnail directory {:?}: {}",
                    thumbnails.output_dir(),
                    e
                );
            }
        }

        let mut report = ScanReport::default();
        for path in self.discover() {
            match self.extractor.extract(&path) {
                Ok(record) => {
                    tracing::debug!("Found {} ({})", record.path, record.size);
                    report.records.push(record);
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::error!("Failed: {}", e);
                }
            }
            on_file(&path);
        }

        sort_by_modified_desc(&mut report.records);
        report
    }

    /// Scan and persist the manifest, replacing any previous one.
    pub fn run(&self) -> Result<ScanOutcome> {
        self.run_with_progress(|_| {})
    }

    /// [`Scanner::run`] with a per-file progress callback.
    pub fn run_with_progress<F: FnMut(&Path)>(&self, on_file: F) -> Result<ScanOutcome> {
        let report = self.scan_with_progress(on_file);
        let manifest = Manifest::new(report.records);
        write_manifest(&self.manifest_path, &manifest)?;

        tracing::info!(
            "Saved {} image(s) to {:?}",
            manifest.total_images,
            self.manifest_path
        );
        Ok(ScanOutcome {
            manifest,
            manifest_path: self.manifest_path.clone(),
            failed: report.failed,
        })
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// Most recently modified first. Stable, so ties keep traversal order.
pub fn sort_by_modified_desc(records: &mut [ImageRecord]) {
    records.sort_by(|a, b| b.modified_time.cmp(&a.modified_time));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};

    fn record(name: &str, minutes: i64) -> ImageRecord {
        let base = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let modified_time = base + Duration::minutes(minutes);
        ImageRecord {
            name: name.to_string(),
            path: name.to_string(),
            thumbnail: None,
            size: "1.0B".to_string(),
            size_bytes: 1,
            modified_date: modified_time.format("%Y-%m-%d %H:%M").to_string(),
            modified_time,
            hash: String::new(),
            mime_type: "image/jpeg".to_string(),
            width: None,
            height: None,
            aspect_ratio: None,
        }
    }

    fn names(records: &[ImageRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_sort_newest_first_ties_stable() {
        let mut records = vec![
            record("old", 0),
            record("tie_a", 10),
            record("new", 20),
            record("tie_b", 10),
        ];
        sort_by_modified_desc(&mut records);
        assert_eq!(names(&records), ["new", "tie_a", "tie_b", "old"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut records = vec![record("a", 5), record("b", 1), record("c", 5), record("d", 9)];
        sort_by_modified_desc(&mut records);
        let once = records.clone();
        sort_by_modified_desc(&mut records);
        assert_eq!(records, once);
    }

    #[test]
    fn test_missing_root() {
        let err = Scanner::new(Path::new("/nonexistent/project"), &Config::default())
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::ProjectRootNotFound(_)));
    }

    #[test]
    fn test_header_strategy_disables_thumbnails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.scan.dimensions = crate::pipeline::DimensionStrategy::Header;

        let scanner = Scanner::new(dir.path(), &config).unwrap();
        assert!(!scanner.thumbnails_enabled());

        scanner.scan();
        assert!(!dir.path().join("thumbnails").exists());
    }
}
