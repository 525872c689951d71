//! CLI enum types shared by the subcommands.

use clap::ValueEnum;
use folio_core::DimensionStrategy;

/// How `scan` reads image dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Dimensions {
    /// Decode every image (thumbnails available)
    Auto,
    /// Same as auto
    Decode,
    /// Parse JPEG headers only; no thumbnails
    Header,
}

impl From<Dimensions> for DimensionStrategy {
    fn from(value: Dimensions) -> Self {
        match value {
            Dimensions::Auto => DimensionStrategy::Auto,
            Dimensions::Decode => DimensionStrategy::Decode,
            Dimensions::Header => DimensionStrategy::Header,
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimensions::Auto => write!(f, "auto"),
            Dimensions::Decode => write!(f, "decode"),
            Dimensions::Header => write!(f, "header"),
        }
    }
}
