//! Shared decode, resize and JPEG encode helpers.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageResult};
use std::path::Path;

/// Decode an image, detecting the format from content before the extension.
pub fn decode(path: &Path) -> ImageResult<DynamicImage> {
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
}

/// Convert to a color layout the JPEG encoder accepts.
///
/// Gray and RGB 8-bit images pass through; alpha, 16-bit and float
/// layouts are flattened to RGB8.
pub fn to_jpeg_compatible(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// Shrink so neither side exceeds the box, keeping aspect ratio.
///
/// Images already inside the box are returned untouched.
pub fn fit_within(
    image: DynamicImage,
    max_width: u32,
    max_height: u32,
    filter: Option<FilterType>,
) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width <= max_width && height <= max_height {
        return image;
    }
    match filter {
        Some(filter) => image.resize(max_width, max_height, filter),
        None => image.thumbnail(max_width, max_height),
    }
}

/// Encode as JPEG at the given quality (1-100).
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> ImageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    image.write_with_encoder(encoder)?;
    Ok(buffer)
}
