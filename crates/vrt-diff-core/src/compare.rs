//! Per-pixel scan of a normalized image pair.

use image::RgbaImage;

use crate::distance::perceptual_distance;

/// Coordinates of every pixel whose distance exceeded the tolerance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelScan {
    pub differing: Vec<(u32, u32)>,
}

impl PixelScan {
    pub fn differing_count(&self) -> u64 {
        self.differing.len() as u64
    }

    pub fn is_identical(&self) -> bool {
        self.differing.is_empty()
    }

    /// Whether the scan fits within `max_failed_pixels`.
    pub fn within_limit(&self, max_failed_pixels: u64) -> bool {
        self.differing_count() <= max_failed_pixels
    }
}

/// Scan two equally-sized images column by column.
///
/// Bit-identical pixels are skipped without computing a distance. Only the
/// overlapping region is scanned if the sizes differ.
pub fn scan_pixels(baseline: &RgbaImage, current: &RgbaImage, tolerance: f64) -> PixelScan {
    let width = baseline.width().min(current.width());
    let height = baseline.height().min(current.height());

    let mut differing = Vec::new();
    for x in 0..width {
        for y in 0..height {
            let b = *baseline.get_pixel(x, y);
            let c = *current.get_pixel(x, y);
            if b == c {
                continue;
            }
            if perceptual_distance(c, b) > tolerance {
                differing.push((x, y));
            }
        }
    }

    PixelScan { differing }
}
