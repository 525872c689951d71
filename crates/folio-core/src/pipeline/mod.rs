//! Scan and compression pipeline components.
//!
//! - **classify**: Decide which paths under the project root are source images
//! - **hash**: Content fingerprints
//! - **dimensions**: Decode or JPEG-header dimension readers
//! - **encode**: Shared decode/resize/JPEG encode helpers
//! - **thumbnail**: `thumb_<stem>.jpg` generation
//! - **metadata**: Per-file manifest records
//! - **scanner**: Walks the tree and builds the manifest
//! - **compress**: Downscale and re-encode photos for upload

pub mod classify;
pub mod compress;
pub mod dimensions;
pub mod encode;
pub mod hash;
pub mod metadata;
pub mod scanner;
pub mod thumbnail;

// Re-exports for convenient access
pub use classify::{Classification, FileClassifier, SkipReason, SUPPORTED_EXTENSIONS};
pub use compress::{CompressionResult, CompressionSummary, ImageCompressor};
pub use dimensions::{DecodeDimensions, DimensionReader, DimensionStrategy, JpegHeaderDimensions};
pub use hash::Hasher;
pub use metadata::{format_size, MetadataExtractor};
pub use scanner::{ScanOutcome, ScanReport, Scanner};
pub use thumbnail::ThumbnailGenerator;
