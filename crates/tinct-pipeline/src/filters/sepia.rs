//! Sepia tone.
//!
//! Applies the classic sepia color matrix per pixel and blends the
//! result with the original by `intensity`: 0 leaves the image
//! untouched, 1 is the full sepia recolor. Alpha passes through.

use crate::filters::{BitmapFilter, to_channel};
use crate::types::{FilterFailure, ResolvedParams, RgbaImage};

/// The standard sepia transform weights, rows = output R/G/B.
const SEPIA_MATRIX: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Sepia recolor with intensity-controlled blend.
///
/// Accepts `intensity` in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct SepiaTone;

impl BitmapFilter for SepiaTone {
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure> {
        let intensity = params.intensity().unwrap_or(1.0).clamp(0.0, 1.0);
        if intensity <= 0.0 {
            return Ok(bitmap.clone());
        }

        Ok(RgbaImage::from_fn(bitmap.width(), bitmap.height(), |x, y| {
            let [r, g, b, a] = bitmap.get_pixel(x, y).0;
            let input = [f64::from(r), f64::from(g), f64::from(b)];
            let mut output = [0u8; 4];
            for (channel, weights) in SEPIA_MATRIX.iter().enumerate() {
                let toned = weights
                    .iter()
                    .zip(input)
                    .map(|(weight, value)| weight * value)
                    .sum::<f64>();
                let blended = input[channel] + (toned - input[channel]) * intensity;
                output[channel] = to_channel(blended);
            }
            output[3] = a;
            image::Rgba(output)
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[allow(clippy::cast_possible_truncation)]
    fn gradient_image() -> RgbaImage {
        RgbaImage::from_fn(8, 8, |x, y| {
            image::Rgba([(x * 30) as u8, (y * 30) as u8, 90, 255])
        })
    }

    fn apply(image: &RgbaImage, intensity: f64) -> RgbaImage {
        let mut params = ResolvedParams::default();
        params.set(crate::types::ParamKey::Intensity, intensity);
        SepiaTone.apply(image, &params).unwrap()
    }

    #[test]
    fn zero_intensity_is_identity() {
        let img = gradient_image();
        assert_eq!(apply(&img, 0.0), img);
    }

    #[test]
    fn full_intensity_recolors_pixels() {
        let img = gradient_image();
        let toned = apply(&img, 1.0);
        assert_ne!(toned, img);
        // Pure blue pixel fully toned: R = 0.189*90, G = 0.168*90, B = 0.131*90.
        let pixel = apply(&RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 90, 255])), 1.0);
        assert_eq!(pixel.get_pixel(0, 0).0, [17, 15, 12, 255]);
    }

    #[test]
    fn alpha_passes_through() {
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 42]));
        let toned = apply(&img, 1.0);
        assert_eq!(toned.get_pixel(0, 0).0[3], 42);
    }

    #[test]
    fn output_dimensions_preserved() {
        let img = gradient_image();
        assert_eq!(apply(&img, 0.7).dimensions(), img.dimensions());
    }

    #[test]
    fn sepia_channels_are_ordered_warm() {
        // Sepia output should lean warm: R >= G >= B for a gray input.
        let toned = apply(&RgbaImage::from_pixel(1, 1, image::Rgba([128, 128, 128, 255])), 1.0);
        let [r, g, b, _] = toned.get_pixel(0, 0).0;
        assert!(r >= g && g >= b, "expected warm ordering, got {r} {g} {b}");
    }
}
