//! PNG loading and deterministic PNG writing.
//!
//! Artifacts are encoded with fixed compression and filter settings so the
//! same diff always produces byte-identical files.

use std::fs;
use std::io::Write;
use std::path::Path;

use image::RgbaImage;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};

use crate::error::DiffError;

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Decode an image file and convert it to RGBA8, whatever its colour type.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, DiffError> {
    let image = image::open(path)?;
    Ok(image.to_rgba8())
}

/// Write an RGBA image to a PNG file.
///
/// The image is fully encoded before the file is created, so an encoding
/// failure leaves nothing on disk.
pub fn write_rgba(image: &RgbaImage, path: &Path, config: &PngConfig) -> Result<(), DiffError> {
    let mut bytes = Vec::new();
    write_rgba_to_writer(image, &mut bytes, config)?;

    if let Err(e) = fs::write(path, &bytes) {
        // Drop whatever a failed write left behind
        let _ = fs::remove_file(path);
        return Err(e.into());
    }
    Ok(())
}

/// Write an RGBA image to any writer.
pub fn write_rgba_to_writer<W: Write>(
    image: &RgbaImage,
    writer: W,
    config: &PngConfig,
) -> Result<(), DiffError> {
    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(image.as_raw())?;
    png_writer.finish()?;

    Ok(())
}
