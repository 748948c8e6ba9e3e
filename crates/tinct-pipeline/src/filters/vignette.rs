//! Vignette (radial darkening).
//!
//! Darkens pixels by their distance from the image center. The
//! untouched inner region extends `radius` pixels from the center;
//! beyond it the darkening ramps linearly, reaching the full
//! `intensity` at the corners. Alpha passes through.

use crate::filters::{BitmapFilter, to_channel};
use crate::types::{FilterFailure, ResolvedParams, RgbaImage};

/// Radial darkening toward the image corners.
///
/// Accepts `intensity` in [0, 1] (maximum darkening at the corners)
/// and `radius` in pixels (the protected inner region).
#[derive(Debug, Clone, Copy)]
pub struct Vignette;

impl BitmapFilter for Vignette {
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure> {
        let intensity = params.intensity().unwrap_or(1.0).clamp(0.0, 1.0);
        let radius = params.radius().unwrap_or(0.0).max(0.0);
        Ok(vignette(bitmap, intensity, radius))
    }
}

/// Apply a vignette of the given strength and inner radius.
#[must_use = "returns the vignetted image"]
pub fn vignette(image: &RgbaImage, intensity: f64, radius: f64) -> RgbaImage {
    let (w, h) = image.dimensions();
    let center_x = f64::from(w) / 2.0;
    let center_y = f64::from(h) / 2.0;
    let corner_distance = center_x.hypot(center_y);

    // Nothing to darken when the protected region covers the corners.
    if intensity <= 0.0 || corner_distance <= radius {
        return image.clone();
    }

    let falloff = corner_distance - radius;
    RgbaImage::from_fn(w, h, |x, y| {
        let dx = (f64::from(x) + 0.5) - center_x;
        let dy = (f64::from(y) + 0.5) - center_y;
        let t = ((dx.hypot(dy) - radius) / falloff).clamp(0.0, 1.0);
        let factor = 1.0 - intensity * t;

        let [r, g, b, a] = image.get_pixel(x, y).0;
        image::Rgba([
            to_channel(f64::from(r) * factor),
            to_channel(f64::from(g) * factor),
            to_channel(f64::from(b) * factor),
            a,
        ])
    })
}
