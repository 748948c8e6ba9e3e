//! Gaussian blur.
//!
//! Delegates to [`imageproc::filter::gaussian_blur_f32`], which only
//! accepts single-channel images, so the RGBA input is split into
//! four channels, blurred independently, and reassembled. Gaussian
//! blur is a linear per-channel operation, so this is equivalent to
//! blurring in color space.

use imageproc::filter::gaussian_blur_f32;

use crate::filters::{BitmapFilter, merge_channels, split_channels};
use crate::types::{FilterFailure, ResolvedParams, RgbaImage};

/// Kernel sigma per pixel of radius.
///
/// A Gaussian's visible support is roughly three sigmas, so a
/// requested radius of `r` pixels maps to `sigma = r / 3`.
const SIGMA_PER_RADIUS: f64 = 1.0 / 3.0;

/// Gaussian blur over the full RGBA image.
///
/// Accepts `radius` (pixels). A zero radius returns the input
/// unchanged, since the underlying kernel builder rejects
/// `sigma <= 0`.
#[derive(Debug, Clone, Copy)]
pub struct GaussianBlur;

impl BitmapFilter for GaussianBlur {
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure> {
        let radius = params.radius().unwrap_or(0.0);
        Ok(blur_rgba(bitmap, radius))
    }
}

/// Blur each channel of `image` with a Gaussian of the given radius.
#[must_use = "returns the blurred image"]
pub fn blur_rgba(image: &RgbaImage, radius: f64) -> RgbaImage {
    #[allow(clippy::cast_possible_truncation)]
    let sigma = (radius * SIGMA_PER_RADIUS) as f32;
    if sigma <= 0.0 {
        return image.clone();
    }

    let channels = split_channels(image);
    let blurred = std::array::from_fn(|c| gaussian_blur_f32(&channels[c], sigma));
    merge_channels(&blurred)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 image, left half red, right half blue.
    fn sharp_color_edge() -> RgbaImage {
        RgbaImage::from_fn(10, 10, |x, _y| {
            if x < 5 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn zero_radius_returns_identical_image() {
        let img = sharp_color_edge();
        assert_eq!(blur_rgba(&img, 0.0), img);
    }

    #[test]
    fn output_dimensions_preserved() {
        let img = RgbaImage::new(17, 31);
        let blurred = blur_rgba(&img, 10.0);
        assert_eq!(blurred.dimensions(), (17, 31));
    }

    #[test]
    fn blur_smooths_sharp_edge() {
        let img = sharp_color_edge();
        let blurred = blur_rgba(&img, 6.0);

        // Red channel near the boundary should be intermediate.
        let left = blurred.get_pixel(4, 5).0[0];
        let right = blurred.get_pixel(5, 5).0[0];
        assert!(left < 255, "expected red to fall near boundary, got {left}");
        assert!(right > 0, "expected red to bleed across boundary, got {right}");
    }

    #[test]
    fn uniform_image_unchanged_by_blur() {
        let img = RgbaImage::from_pixel(10, 10, image::Rgba([100, 150, 200, 250]));
        let blurred = blur_rgba(&img, 6.0);
        for pixel in blurred.pixels() {
            for (c, &expected) in [100u8, 150, 200, 250].iter().enumerate() {
                let diff = i16::from(pixel.0[c]) - i16::from(expected);
                assert!(diff.abs() <= 1, "channel {c}: expected ~{expected}, got {}", pixel.0[c]);
            }
        }
    }
}
