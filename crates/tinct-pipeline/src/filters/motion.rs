//! Motion blur.
//!
//! Streaks the image horizontally by averaging each pixel with its
//! row neighbors: a box kernel that is `radius` pixels wide and one
//! pixel tall, applied per channel via
//! [`imageproc::filter::box_filter`].

use imageproc::filter::box_filter;

use crate::filters::{BitmapFilter, merge_channels, split_channels};
use crate::types::{FilterFailure, ResolvedParams, RgbaImage};

/// Horizontal streak blur.
///
/// Accepts `radius` (pixels of streak on either side). A zero radius
/// returns the input unchanged.
#[derive(Debug, Clone, Copy)]
pub struct MotionBlur;

impl BitmapFilter for MotionBlur {
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure> {
        let radius = params.radius().unwrap_or(0.0);
        Ok(motion_blur(bitmap, radius))
    }
}

/// Streak `image` horizontally with the given radius.
///
/// The kernel radius is capped so it never exceeds the image width.
#[must_use = "returns the streaked image"]
pub fn motion_blur(image: &RgbaImage, radius: f64) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let x_radius = (radius.round().max(0.0) as u32).min((w - 1) / 2);
    if x_radius == 0 {
        return image.clone();
    }

    let channels = split_channels(image);
    let streaked = std::array::from_fn(|c| box_filter(&channels[c], x_radius, 0));
    merge_channels(&streaked)
}
