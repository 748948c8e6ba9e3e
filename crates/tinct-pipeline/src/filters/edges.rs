//! Edge highlighting.
//!
//! Computes the Sobel gradient magnitude of the image luma via
//! [`imageproc::gradients`] and renders it as a grayscale edge map:
//! background falls to black, edges glow by gradient strength. The
//! `intensity` parameter scales the response before clamping.

use image::GrayImage;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

use crate::filters::{BitmapFilter, to_channel};
use crate::types::{FilterFailure, ResolvedParams, RgbaImage};

/// Sobel gradient edge map.
///
/// Accepts `intensity` in [0, 1], scaling the gradient response.
#[derive(Debug, Clone, Copy)]
pub struct Edges;

impl BitmapFilter for Edges {
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure> {
        let intensity = params.intensity().unwrap_or(1.0).clamp(0.0, 1.0);

        let luma = to_luma(bitmap);
        let gx = horizontal_sobel(&luma);
        let gy = vertical_sobel(&luma);

        Ok(RgbaImage::from_fn(bitmap.width(), bitmap.height(), |x, y| {
            let dx = f64::from(gx.get_pixel(x, y).0[0]);
            let dy = f64::from(gy.get_pixel(x, y).0[0]);
            let magnitude = dx.hypot(dy);
            let value = to_channel(magnitude * intensity);
            image::Rgba([value, value, value, 255])
        }))
    }
}

/// Convert an RGBA image to luma with the standard weights
/// (`0.299 R + 0.587 G + 0.114 B`).
fn to_luma(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
        image::Luma([to_channel(luma)])
    })
}
