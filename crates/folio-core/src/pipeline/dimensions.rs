//! Pixel dimension readers.
//!
//! Two strategies are available: a full decode through the `image` crate,
//! and a minimal JPEG header walk that reads the start-of-frame segment
//! without decoding pixel data. The strategy is picked once per run with
//! [`DimensionStrategy::reader`] and shared by every file.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::types::Dimensions;

/// JPEG start-of-image marker.
const SOI: [u8; 2] = [0xFF, 0xD8];

/// Which dimension reader to use for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionStrategy {
    /// Decode strategy, the preferred default
    #[default]
    Auto,
    /// Read dimensions through the image library (all supported formats)
    Decode,
    /// Walk JPEG headers only; other formats have no dimensions
    Header,
}

impl DimensionStrategy {
    /// Build the reader for this strategy.
    pub fn reader(self) -> Box<dyn DimensionReader> {
        match self {
            DimensionStrategy::Auto | DimensionStrategy::Decode => Box::new(DecodeDimensions),
            DimensionStrategy::Header => Box::new(JpegHeaderDimensions),
        }
    }

    /// Whether pixel decoding (and therefore thumbnailing) is available.
    pub fn can_decode(self) -> bool {
        !matches!(self, DimensionStrategy::Header)
    }
}

/// Reads pixel dimensions from an image file.
pub trait DimensionReader {
    /// Return the file's dimensions, or `None` if they cannot be determined.
    fn read(&self, path: &Path) -> Option<Dimensions>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// Reads dimensions through the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecodeDimensions;

impl DimensionReader for DecodeDimensions {
    fn read(&self, path: &Path) -> Option<Dimensions> {
        let result = image::ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(image::ImageError::IoError)
            .and_then(|reader| reader.into_dimensions());

        match result {
            Ok((width, height)) => Some(Dimensions::new(width, height)),
            Err(e) => {
                tracing::debug!("No dimensions for {:?}: {}", path, e);
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "decode"
    }
}

/// Reads dimensions from the SOF segment of a JPEG file.
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegHeaderDimensions;

impl DimensionReader for JpegHeaderDimensions {
    fn read(&self, path: &Path) -> Option<Dimensions> {
        let file = File::open(path).ok()?;
        let (width, height) = scan_jpeg_header(BufReader::new(file))?;
        Some(Dimensions::new(width, height))
    }

    fn name(&self) -> &'static str {
        "header"
    }
}

/// Whether a marker code starts a frame (baseline, progressive, lossless,
/// differential or arithmetic-coded). C4, C8 and CC are not frames.
fn is_sof_marker(code: u8) -> bool {
    matches!(code, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF)
}

/// Walk JPEG marker segments until a start-of-frame segment is found.
///
/// Returns `(width, height)`. Any malformed marker, short read or non-JPEG
/// input yields `None`.
pub fn scan_jpeg_header<R: Read>(mut reader: R) -> Option<(u32, u32)> {
    let mut soi = [0u8; 2];
    reader.read_exact(&mut soi).ok()?;
    if soi != SOI {
        return None;
    }

    loop {
        let mut marker = [0u8; 2];
        reader.read_exact(&mut marker).ok()?;
        if marker[0] != 0xFF {
            return None;
        }

        if is_sof_marker(marker[1]) {
            // Segment length (2) and sample precision (1)
            skip(&mut reader, 3)?;
            let height = read_u16_be(&mut reader)?;
            let width = read_u16_be(&mut reader)?;
            return Some((width as u32, height as u32));
        }

        let length = read_u16_be(&mut reader)?;
        if length < 2 {
            return None;
        }
        skip(&mut reader, u64::from(length - 2))?;
    }
}

fn read_u16_be<R: Read>(reader: &mut R) -> Option<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf).ok()?;
    Some(u16::from_be_bytes(buf))
}

/// Discard exactly `n` bytes, failing on a short read.
fn skip<R: Read>(reader: &mut R, n: u64) -> Option<()> {
    let copied = io::copy(&mut reader.by_ref().take(n), &mut io::sink()).ok()?;
    (copied == n).then_some(())
}
