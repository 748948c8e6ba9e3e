//! Unsharp mask (sharpening).
//!
//! Classic unsharp masking: subtract a Gaussian-blurred copy from the
//! original to isolate detail, then add the detail back scaled by
//! `intensity`. Reuses the per-channel Gaussian from
//! [`blur`](crate::filters::blur) for the low-pass step.

use crate::filters::{BitmapFilter, blur::blur_rgba, to_channel};
use crate::types::{FilterFailure, ResolvedParams, RgbaImage};

/// Detail amplification against a Gaussian low-pass.
///
/// Accepts `radius` (pixels, the low-pass footprint) and `intensity`
/// in [0, 1] (how much detail to add back).
#[derive(Debug, Clone, Copy)]
pub struct UnsharpMask;

impl BitmapFilter for UnsharpMask {
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure> {
        let radius = params.radius().unwrap_or(0.0);
        let intensity = params.intensity().unwrap_or(0.0).max(0.0);
        Ok(unsharp_mask(bitmap, radius, intensity))
    }
}

/// Sharpen `image` by adding back `amount` of the detail removed by a
/// Gaussian blur of the given radius.
#[must_use = "returns the sharpened image"]
pub fn unsharp_mask(image: &RgbaImage, radius: f64, amount: f64) -> RgbaImage {
    if radius <= 0.0 || amount <= 0.0 {
        return image.clone();
    }

    let blurred = blur_rgba(image, radius);
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let original = image.get_pixel(x, y).0;
        let low_pass = blurred.get_pixel(x, y).0;
        let mut output = [0u8; 4];
        for channel in 0..3 {
            let value = f64::from(original[channel]);
            let detail = value - f64::from(low_pass[channel]);
            output[channel] = to_channel(detail.mul_add(amount, value));
        }
        output[3] = original[3];
        image::Rgba(output)
    })
}
