//! Error types for the diff engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, normalizing, or writing images.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Decode(#[from] image::ImageError),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    /// The top crop would remove every row of an image.
    #[error("cannot crop {rows} rows from {role} image of height {height}")]
    CropTooLarge {
        role: &'static str,
        rows: u32,
        height: u32,
    },
}

/// Errors raised while reading or validating the comparison configuration.
///
/// These are fatal: configuration is resolved once, before any image work.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid tolerance {0}: expected a percentage between 0 and 100")]
    InvalidTolerance(f64),
}
