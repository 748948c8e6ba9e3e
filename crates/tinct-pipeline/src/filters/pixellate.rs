//! Pixellate (block mosaic).
//!
//! Downsamples with nearest-neighbor resampling and scales back up,
//! producing square blocks of uniform color. Delegates resampling to
//! [`image::imageops::resize`].

use image::imageops::{self, FilterType};

use crate::filters::BitmapFilter;
use crate::types::{FilterFailure, ResolvedParams, RgbaImage};

/// Block mosaic with nearest-neighbor resampling.
///
/// Accepts `scale`: the block edge length in pixels. Values at or
/// below 1 leave the image unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Pixellate;

impl BitmapFilter for Pixellate {
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure> {
        let scale = params.scale().unwrap_or(1.0);
        Ok(pixellate(bitmap, scale))
    }
}

/// Pixellate `image` into blocks of `scale` pixels on a side.
#[must_use = "returns the pixellated image"]
pub fn pixellate(image: &RgbaImage, scale: f64) -> RgbaImage {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let block = scale.round().max(1.0) as u32;
    if block <= 1 {
        return image.clone();
    }

    let (w, h) = image.dimensions();
    let down_w = w.div_ceil(block).max(1);
    let down_h = h.div_ceil(block).max(1);

    let down = imageops::resize(image, down_w, down_h, FilterType::Nearest);
    imageops::resize(&down, w, h, FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::cast_possible_truncation)]
    fn gradient_image() -> RgbaImage {
        RgbaImage::from_fn(16, 16, |x, y| {
            image::Rgba([(x * 15) as u8, (y * 15) as u8, 0, 255])
        })
    }

    #[test]
    fn scale_of_one_is_identity() {
        let img = gradient_image();
        assert_eq!(pixellate(&img, 1.0), img);
    }

    #[test]
    fn output_dimensions_preserved() {
        let img = gradient_image();
        assert_eq!(pixellate(&img, 4.0).dimensions(), (16, 16));
        // Block size larger than the image still preserves dimensions.
        assert_eq!(pixellate(&img, 40.0).dimensions(), (16, 16));
    }

    #[test]
    fn blocks_are_uniform() {
        let img = gradient_image();
        let out = pixellate(&img, 4.0);
        // Every pixel inside a 4x4 block shares the block's color.
        for by in 0..4u32 {
            for bx in 0..4u32 {
                let reference = out.get_pixel(bx * 4, by * 4);
                for dy in 0..4 {
                    for dx in 0..4 {
                        assert_eq!(
                            out.get_pixel(bx * 4 + dx, by * 4 + dy),
                            reference,
                            "block ({bx},{by}) not uniform at offset ({dx},{dy})",
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn pixellation_changes_a_gradient() {
        let img = gradient_image();
        assert_ne!(pixellate(&img, 4.0), img);
    }
}
