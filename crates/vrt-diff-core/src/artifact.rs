//! Diff artifact rendering.

use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::DiffError;
use crate::png::{write_rgba, PngConfig};

/// Colour painted over every differing pixel.
pub const HIGHLIGHT: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// File name of the artifact for an image, e.g. `diff_knob.png`.
pub fn artifact_name(image_name: &str) -> String {
    format!("diff_{}", image_name)
}

/// Path of the artifact for an image inside `output_dir`.
pub fn artifact_path(output_dir: &Path, image_name: &str) -> PathBuf {
    output_dir.join(artifact_name(image_name))
}

/// Grayscale copy of the baseline with each differing coordinate in red.
///
/// The grayscale copy is fully opaque regardless of the baseline's alpha.
pub fn render_diff_mask(baseline: &RgbaImage, differing: &[(u32, u32)]) -> RgbaImage {
    let gray = DynamicImage::ImageRgba8(baseline.clone()).to_luma8();
    let mut mask = DynamicImage::ImageLuma8(gray).to_rgba8();

    for &(x, y) in differing {
        if x < mask.width() && y < mask.height() {
            mask.put_pixel(x, y, HIGHLIGHT);
        }
    }

    mask
}

/// Render and write the artifact, returning the written path.
pub fn write_artifact(
    baseline: &RgbaImage,
    differing: &[(u32, u32)],
    output_dir: &Path,
    image_name: &str,
) -> Result<PathBuf, DiffError> {
    let path = artifact_path(output_dir, image_name);
    let mask = render_diff_mask(baseline, differing);
    write_rgba(&mask, &path, &PngConfig::default())?;
    log::info!("wrote diff artifact {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_name() {
        assert_eq!(artifact_name("knob.png"), "diff_knob.png");
        assert_eq!(
            artifact_path(Path::new("out"), "knob.png"),
            PathBuf::from("out").join("diff_knob.png")
        );
    }

    #[test]
    fn test_mask_highlights_exactly_differing_pixels() {
        let baseline = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
        let differing = vec![(10, 10), (20, 20)];

        let mask = render_diff_mask(&baseline, &differing);

        for (x, y, pixel) in mask.enumerate_pixels() {
            if differing.contains(&(x, y)) {
                assert_eq!(*pixel, HIGHLIGHT);
            } else {
                assert_ne!(*pixel, HIGHLIGHT, "pixel ({}, {}) should not be red", x, y);
            }
        }
    }

    #[test]
    fn test_mask_is_grayscale_and_opaque() {
        let baseline = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8 * 60, y as u8 * 60, 90, 30]));
        let mask = render_diff_mask(&baseline, &[]);

        for pixel in mask.pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            assert_eq!(r, g);
            assert_eq!(g, b);
            assert_eq!(a, 255);
        }
    }

    #[test]
    fn test_write_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let baseline = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]));

        let path = write_artifact(&baseline, &[(1, 2)], tmp.path(), "panel.png").unwrap();

        assert_eq!(path, tmp.path().join("diff_panel.png"));
        let written = crate::png::load_rgba(&path).unwrap();
        assert_eq!(*written.get_pixel(1, 2), HIGHLIGHT);
        assert_ne!(*written.get_pixel(0, 0), HIGHLIGHT);
    }
}
