//! Perceptual pixel distance.

use image::Rgba;

/// Largest possible Euclidean distance between two RGBA8 pixels.
pub const MAX_DISTANCE: f64 = 510.0; // sqrt(4 * 255^2)

/// Euclidean distance over all four RGBA channels, normalized to 0-100.
///
/// Alpha is weighted the same as the colour channels.
pub fn perceptual_distance(a: Rgba<u8>, b: Rgba<u8>) -> f64 {
    let sum: f64 = a
        .0
        .iter()
        .zip(b.0.iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum();

    sum.sqrt() / MAX_DISTANCE * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_pixels_have_zero_distance() {
        let p = Rgba([12, 34, 56, 255]);
        assert_eq!(perceptual_distance(p, p), 0.0);
    }

    #[test]
    fn test_opposite_pixels_have_full_distance() {
        let black = Rgba([0, 0, 0, 0]);
        let white = Rgba([255, 255, 255, 255]);
        assert!((perceptual_distance(black, white) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_red_vs_green() {
        // sqrt(2 * 255^2) / 510 = 1/sqrt(2)
        let red = Rgba([255, 0, 0, 255]);
        let green = Rgba([0, 255, 0, 255]);
        let expected = 100.0 / 2f64.sqrt();
        assert!((perceptual_distance(red, green) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_alpha_contributes_equally() {
        let opaque = Rgba([100, 100, 100, 255]);
        let faded = Rgba([100, 100, 100, 245]);
        let darker = Rgba([90, 100, 100, 255]);
        assert_eq!(
            perceptual_distance(opaque, faded),
            perceptual_distance(opaque, darker)
        );
    }

    #[test]
    fn test_symmetric() {
        let a = Rgba([10, 200, 30, 128]);
        let b = Rgba([250, 1, 99, 7]);
        assert_eq!(perceptual_distance(a, b), perceptual_distance(b, a));
    }

    #[test]
    fn test_small_change_below_default_tolerance() {
        // A 5-level shift in one channel is about 0.98%.
        let a = Rgba([200, 200, 200, 255]);
        let b = Rgba([205, 200, 200, 255]);
        let d = perceptual_distance(a, b);
        assert!(d > 0.9 && d < 1.0, "got {}", d);
    }
}
