//! Geometry normalization between a baseline and a current capture.
//!
//! Captures may come from machines with different pixel densities (a 2x
//! laptop display locally, a 1x virtual display on CI). The top crop is given
//! in logical pixels, i.e. pixels of the lower-density image of the pair, and
//! is scaled up for the denser one. After cropping, both images are shrunk to
//! their shared minimum resolution so the comparison always happens at the
//! lower density.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::DiffError;

/// A baseline/current pair with identical dimensions, ready for scanning.
#[derive(Debug, Clone)]
pub struct NormalizedPair {
    pub baseline: RgbaImage,
    pub current: RgbaImage,
}

impl NormalizedPair {
    /// Whether both images ended up with the same dimensions.
    pub fn dimensions_match(&self) -> bool {
        self.baseline.dimensions() == self.current.dimensions()
    }
}

/// Ratio of the current capture's width to the baseline's width.
///
/// Falls back to 1.0 when either width is zero.
pub fn density_scale(baseline_width: u32, current_width: u32) -> f64 {
    if baseline_width == 0 || current_width == 0 {
        return 1.0;
    }
    f64::from(current_width) / f64::from(baseline_width)
}

/// Rows to crop from `(baseline, current)` for a logical top crop.
///
/// With `scale >= 1` the baseline is the 1x reference and the current image
/// loses `crop_top_px * scale` rows. With `scale < 1` the baseline is the
/// denser capture and loses `crop_top_px / scale` rows. Rounding is
/// half-to-even.
pub fn crop_rows(crop_top_px: u32, scale: f64) -> (u32, u32) {
    let logical = f64::from(crop_top_px);
    if scale >= 1.0 {
        (crop_top_px, to_rows(logical * scale))
    } else {
        (to_rows(logical / scale), crop_top_px)
    }
}

fn to_rows(value: f64) -> u32 {
    value.round_ties_even().clamp(0.0, f64::from(u32::MAX)) as u32
}

fn crop_top(image: RgbaImage, rows: u32, role: &'static str) -> Result<RgbaImage, DiffError> {
    if rows == 0 {
        return Ok(image);
    }

    let (width, height) = image.dimensions();
    if rows >= height {
        return Err(DiffError::CropTooLarge { role, rows, height });
    }

    Ok(imageops::crop_imm(&image, 0, rows, width, height - rows).to_image())
}

fn shrink_to(image: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image;
    }
    imageops::resize(&image, width, height, FilterType::Lanczos3)
}

/// Crop and resize a pair so both images share the same geometry.
///
/// Images are only ever shrunk, never upscaled. The caller must still check
/// [`NormalizedPair::dimensions_match`] before scanning pixels.
pub fn normalize_pair(
    baseline: RgbaImage,
    current: RgbaImage,
    crop_top_px: u32,
) -> Result<NormalizedPair, DiffError> {
    let scale = density_scale(baseline.width(), current.width());
    log::debug!(
        "baseline {}x{}, current {}x{}, scale {:.3}",
        baseline.width(),
        baseline.height(),
        current.width(),
        current.height(),
        scale
    );

    let (baseline, current) = if crop_top_px > 0 {
        let (baseline_rows, current_rows) = crop_rows(crop_top_px, scale);
        log::debug!(
            "cropping {} rows from baseline, {} rows from current",
            baseline_rows,
            current_rows
        );
        (
            crop_top(baseline, baseline_rows, "baseline")?,
            crop_top(current, current_rows, "current")?,
        )
    } else {
        (baseline, current)
    };

    if baseline.dimensions() == current.dimensions() {
        return Ok(NormalizedPair { baseline, current });
    }

    let target_w = baseline.width().min(current.width());
    let target_h = baseline.height().min(current.height());
    log::debug!("shrinking pair to {}x{}", target_w, target_h);

    Ok(NormalizedPair {
        baseline: shrink_to(baseline, target_w, target_h),
        current: shrink_to(current, target_w, target_h),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn with_top_band(width: u32, height: u32, band: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_fn(width, height, |_, y| if y < band { color } else { WHITE })
    }

    #[test]
    fn test_density_scale() {
        assert_eq!(density_scale(100, 200), 2.0);
        assert_eq!(density_scale(200, 100), 0.5);
        assert_eq!(density_scale(0, 100), 1.0);
        assert_eq!(density_scale(100, 0), 1.0);
    }

    #[test]
    fn test_crop_rows_current_denser() {
        assert_eq!(crop_rows(28, 2.0), (28, 56));
        assert_eq!(crop_rows(3, 1.0), (3, 3));
    }

    #[test]
    fn test_crop_rows_baseline_denser() {
        assert_eq!(crop_rows(2, 0.5), (4, 2));
    }

    #[test]
    fn test_crop_rows_rounds_half_to_even() {
        // 5 * 1.5 = 7.5 -> 8, 3 * 1.5 = 4.5 -> 4
        assert_eq!(crop_rows(5, 1.5), (5, 8));
        assert_eq!(crop_rows(3, 1.5), (3, 4));
    }

    #[test]
    fn test_same_size_without_crop_is_untouched() {
        let baseline = with_top_band(8, 8, 2, Rgba([255, 0, 0, 255]));
        let current = baseline.clone();
        let pair = normalize_pair(baseline.clone(), current, 0).unwrap();
        assert!(pair.dimensions_match());
        assert_eq!(pair.baseline, baseline);
    }

    #[test]
    fn test_current_at_double_density() {
        let baseline = with_top_band(8, 8, 2, Rgba([255, 0, 0, 255]));
        let current = with_top_band(16, 16, 4, Rgba([0, 255, 0, 255]));

        let pair = normalize_pair(baseline, current, 2).unwrap();

        assert_eq!(pair.baseline.dimensions(), (8, 6));
        assert_eq!(pair.current.dimensions(), (8, 6));
        assert!(pair.baseline.pixels().all(|p| *p == WHITE));
        assert!(pair.current.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_baseline_at_double_density() {
        let baseline = with_top_band(16, 16, 4, Rgba([255, 0, 0, 255]));
        let current = with_top_band(8, 8, 2, Rgba([0, 255, 0, 255]));

        let pair = normalize_pair(baseline, current, 2).unwrap();

        assert_eq!(pair.baseline.dimensions(), (8, 6));
        assert_eq!(pair.current.dimensions(), (8, 6));
        assert!(pair.baseline.pixels().all(|p| *p == WHITE));
        assert!(pair.current.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_shrinks_each_axis_independently() {
        let baseline = RgbaImage::from_pixel(10, 20, WHITE);
        let current = RgbaImage::from_pixel(12, 16, WHITE);

        let pair = normalize_pair(baseline, current, 0).unwrap();

        assert_eq!(pair.baseline.dimensions(), (10, 16));
        assert_eq!(pair.current.dimensions(), (10, 16));
    }

    #[test]
    fn test_crop_larger_than_image_is_error() {
        let baseline = RgbaImage::from_pixel(4, 4, WHITE);
        let current = RgbaImage::from_pixel(4, 4, WHITE);

        let err = normalize_pair(baseline, current, 4).unwrap_err();
        assert!(matches!(
            err,
            DiffError::CropTooLarge {
                role: "baseline",
                rows: 4,
                height: 4
            }
        ));
    }
}
