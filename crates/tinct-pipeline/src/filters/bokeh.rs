//! Bokeh-style blur.
//!
//! Approximates a lens defocus disc with a square box kernel applied
//! per channel via [`imageproc::filter::box_filter`]. Unlike the
//! Gaussian, the box kernel weights the whole neighborhood equally,
//! which keeps bright highlights blooming into flat patches rather
//! than fading smoothly.

use imageproc::filter::box_filter;

use crate::filters::{BitmapFilter, merge_channels, split_channels};
use crate::types::{FilterFailure, ResolvedParams, RgbaImage};

/// Box-kernel defocus blur.
///
/// Accepts `radius` (pixels). A zero radius returns the input
/// unchanged.
#[derive(Debug, Clone, Copy)]
pub struct BokehBlur;

impl BitmapFilter for BokehBlur {
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure> {
        let radius = params.radius().unwrap_or(0.0);
        Ok(bokeh_blur(bitmap, radius))
    }
}

/// Blur each channel of `image` with a box kernel of the given radius.
///
/// The kernel radius is capped so it never exceeds the image extent.
#[must_use = "returns the blurred image"]
pub fn bokeh_blur(image: &RgbaImage, radius: f64) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let requested = radius.round().max(0.0) as u32;
    let x_radius = requested.min((w - 1) / 2);
    let y_radius = requested.min((h - 1) / 2);
    if x_radius == 0 && y_radius == 0 {
        return image.clone();
    }

    let channels = split_channels(image);
    let blurred = std::array::from_fn(|c| box_filter(&channels[c], x_radius, y_radius));
    merge_channels(&blurred)
}
