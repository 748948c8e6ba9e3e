//! Crystallize (faceted cell mosaic).
//!
//! Quantizes the image onto a grid of cells whose alternate rows are
//! offset by half a cell, giving a faceted, honeycomb-like look
//! rather than the square blocks of pixellate. Each cell takes the
//! source color at its center. Deterministic: no randomized seed
//! points.

use crate::filters::BitmapFilter;
use crate::types::{FilterFailure, ResolvedParams, RgbaImage};

/// Faceted cell mosaic.
///
/// Accepts `radius`: the cell size in pixels. Values at or below 1
/// leave the image unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Crystallize;

impl BitmapFilter for Crystallize {
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure> {
        let radius = params.radius().unwrap_or(0.0);
        Ok(crystallize(bitmap, radius))
    }
}

/// Crystallize `image` into offset cells of roughly `radius` pixels.
#[must_use = "returns the crystallized image"]
pub fn crystallize(image: &RgbaImage, radius: f64) -> RgbaImage {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cell = radius.round().max(0.0) as u32;
    if cell <= 1 {
        return image.clone();
    }

    let (w, h) = image.dimensions();
    RgbaImage::from_fn(w, h, |x, y| {
        let row = y / cell;
        // Offset odd rows by half a cell to break up the square grid.
        let shift = if row % 2 == 1 { cell / 2 } else { 0 };
        let col = (x + shift) / cell;

        // Sample the source at the cell center, clamped to the image.
        let center_x = (col * cell + cell / 2).saturating_sub(shift).min(w - 1);
        let center_y = (row * cell + cell / 2).min(h - 1);
        *image.get_pixel(center_x, center_y)
    })
}
