//! Core data types for the Folio manifest.
//!
//! Field names follow the manifest consumed by the gallery page script, so
//! the serialized form is the public contract of this crate.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One manifest entry describing a single source image file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Base file name
    pub name: String,

    /// Path relative to the project root, `/`-separated
    pub path: String,

    /// Thumbnail path relative to the project root, when one was written
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Human-readable size, e.g. "1.2MB"
    pub size: String,

    /// File size in bytes
    pub size_bytes: u64,

    /// Last modification time
    pub modified_time: DateTime<Local>,

    /// Modification time as "YYYY-MM-DD HH:MM"
    pub modified_date: String,

    /// BLAKE3 hex digest of the file contents; empty if the file could not be read
    #[serde(default)]
    pub hash: String,

    /// MIME type guessed from the extension
    pub mime_type: String,

    /// Pixel width
    #[serde(default)]
    pub width: Option<u32>,

    /// Pixel height
    #[serde(default)]
    pub height: Option<u32>,

    /// width / height rounded to two decimals
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
}

/// The persisted aggregate of all discovered images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// When the scan finished
    pub last_updated: DateTime<Local>,

    /// Number of records in `images`
    pub total_images: usize,

    /// Sum of `size_bytes` over `images`
    pub total_size: u64,

    /// Records, most recently modified first
    pub images: Vec<ImageRecord>,
}

impl Manifest {
    /// Wrap a record list, computing the totals from it.
    pub fn new(images: Vec<ImageRecord>) -> Self {
        Self {
            last_updated: Local::now(),
            total_images: images.len(),
            total_size: images.iter().map(|img| img.size_bytes).sum(),
            images,
        }
    }

    /// Human-readable total size.
    pub fn total_size_formatted(&self) -> String {
        crate::pipeline::metadata::format_size(self.total_size)
    }
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// width / height rounded to two decimals, 0 when height is 0
    pub aspect_ratio: f64,
}

impl Dimensions {
    /// Build dimensions, computing the rounded aspect ratio.
    pub fn new(width: u32, height: u32) -> Self {
        let aspect_ratio = if height == 0 {
            0.0
        } else {
            (width as f64 / height as f64 * 100.0).round() / 100.0
        };
        Self {
            width,
            height,
            aspect_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, size_bytes: u64) -> ImageRecord {
        let modified_time = Local::now();
        ImageRecord {
            name: name.to_string(),
            path: format!("photos/{name}"),
            thumbnail: None,
            size: crate::pipeline::metadata::format_size(size_bytes),
            size_bytes,
            modified_date: modified_time.format("%Y-%m-%d %H:%M").to_string(),
            modified_time,
            hash: String::new(),
            mime_type: "image/jpeg".to_string(),
            width: None,
            height: None,
            aspect_ratio: None,
        }
    }

    #[test]
    fn test_manifest_totals() {
        let manifest = Manifest::new(vec![record("a.jpg", 100), record("b.jpg", 2048)]);
        assert_eq!(manifest.total_images, 2);
        assert_eq!(manifest.total_size, 2148);
        assert_eq!(manifest.total_size_formatted(), "2.1KB");
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::new(vec![]);
        assert_eq!(manifest.total_images, 0);
        assert_eq!(manifest.total_size, 0);
        assert_eq!(manifest.total_size_formatted(), "0B");
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let json = serde_json::to_value(record("a.jpg", 1)).unwrap();
        assert!(json["thumbnail"].is_null());
        assert!(json["width"].is_null());
        assert!(json["height"].is_null());
        assert!(json["aspect_ratio"].is_null());
        assert_eq!(json["path"], "photos/a.jpg");
    }

    #[test]
    fn test_round_trip_keeps_totals() {
        let manifest = Manifest::new(vec![
            record("a.jpg", 10),
            record("b.png", 20),
            record("c.gif", 30),
        ]);
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let parsed: Manifest = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.images.len(), parsed.total_images);
        assert_eq!(
            parsed.images.iter().map(|i| i.size_bytes).sum::<u64>(),
            parsed.total_size
        );
        assert_eq!(parsed.images, manifest.images);
    }

    #[test]
    fn test_dimensions_aspect_ratio() {
        assert_eq!(Dimensions::new(100, 50).aspect_ratio, 2.0);
        assert_eq!(Dimensions::new(4000, 3000).aspect_ratio, 1.33);
        assert_eq!(Dimensions::new(2, 3).aspect_ratio, 0.67);
        assert_eq!(Dimensions::new(10, 0).aspect_ratio, 0.0);
    }
}
