//! Scan eligibility rules for paths found under the project root.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Extensions (lowercase, without dot) accepted by the scanner.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif"];

/// Tooling directories that never contain site images.
pub const RESERVED_DIRS: &[&str] = &[".github"];

/// Why a path was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Directory, or anything else that is not a regular file
    NotAFile,
    /// Extension missing or not in [`SUPPORTED_EXTENSIONS`]
    UnsupportedExtension,
    /// A path segment starts with `.`
    Hidden,
    /// A path segment is in [`RESERVED_DIRS`]
    Reserved,
    /// Path is inside the thumbnail output directory
    ThumbnailOutput,
}

/// Classifier verdict for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Eligible,
    Skip(SkipReason),
}

impl Classification {
    pub fn is_eligible(self) -> bool {
        matches!(self, Classification::Eligible)
    }
}

/// Decides which files under a project root are source images.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    /// Thumbnail directory relative to the project root, if it lies inside it
    thumbnail_dir: Option<PathBuf>,
}

impl FileClassifier {
    /// Create a classifier for `root`, excluding `thumbnail_dir` when given.
    ///
    /// A thumbnail directory outside the root can never contain scanned
    /// files and is ignored.
    pub fn new(root: &Path, thumbnail_dir: Option<&Path>) -> Self {
        let thumbnail_dir = thumbnail_dir
            .and_then(|dir| {
                if dir.is_relative() {
                    lexical_normalize(dir)
                } else {
                    let dir = lexical_normalize(dir)?;
                    let root = lexical_normalize(root)?;
                    dir.strip_prefix(&root).ok().map(Path::to_path_buf)
                }
            })
            .filter(|dir| !dir.as_os_str().is_empty());
        Self { thumbnail_dir }
    }

    /// Classify a path given relative to the project root.
    ///
    /// Pure: only `relative` and `is_file` are inspected.
    pub fn classify(&self, relative: &Path, is_file: bool) -> Classification {
        if !is_file {
            return Classification::Skip(SkipReason::NotAFile);
        }
        if !has_supported_extension(relative) {
            return Classification::Skip(SkipReason::UnsupportedExtension);
        }
        if let Some(reason) = self.directory_rule(relative) {
            return Classification::Skip(reason);
        }
        Classification::Eligible
    }

    /// Whether the walker should descend into a directory (root-relative).
    pub fn should_descend(&self, relative: &Path) -> bool {
        self.directory_rule(relative).is_none()
    }

    /// Rules 3-5, shared by file classification and directory pruning.
    ///
    /// Segments are compared as raw OS strings so non-UTF-8 names are
    /// still caught. Reserved names are reported before the hidden rule.
    fn directory_rule(&self, relative: &Path) -> Option<SkipReason> {
        let segments: Vec<&OsStr> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s),
                _ => None,
            })
            .collect();

        if segments
            .iter()
            .any(|s| RESERVED_DIRS.iter().any(|name| *s == OsStr::new(name)))
        {
            return Some(SkipReason::Reserved);
        }
        if segments.iter().any(|s| s.as_encoded_bytes().starts_with(b".")) {
            return Some(SkipReason::Hidden);
        }
        if let Some(dir) = &self.thumbnail_dir {
            if relative.starts_with(dir) {
                return Some(SkipReason::ThumbnailOutput);
            }
        }
        None
    }
}

/// Resolve `.` and `..` without touching the filesystem.
///
/// Returns `None` when `..` climbs above the start of the path.
fn lexical_normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    return None;
                }
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}

/// Check if a file has an extension in [`SUPPORTED_EXTENSIONS`] (case-insensitive).
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext_lower = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}
