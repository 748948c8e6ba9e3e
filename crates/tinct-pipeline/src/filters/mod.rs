//! Builtin filter implementations and the filter boundary.
//!
//! [`BitmapFilter`] is the single capability the pipeline requires of
//! a filter implementation: RGBA8 bitmap + resolved natural-unit
//! parameters in, new RGBA8 bitmap out, with failure reported
//! distinctly from success. The builtin set reimplements the nine
//! classic photo filters, delegating numerics to `imageproc` where it
//! provides them and using small per-pixel math otherwise. All
//! builtin filters preserve dimensions and are deterministic.

use std::sync::Arc;

use image::GrayImage;

use crate::registry::{FilterDescriptor, ParamSpec};
use crate::types::{FilterFailure, ParamKey, ResolvedParams, RgbaImage};

pub mod blur;
pub mod bokeh;
pub mod crystallize;
pub mod edges;
pub mod motion;
pub mod pixellate;
pub mod sepia;
pub mod unsharp;
pub mod vignette;

/// Maximum of the natural unit range for intensity parameters.
pub const INTENSITY_UNIT_RANGE: f64 = 1.0;

/// Maximum of the natural unit range for radius parameters (pixels).
pub const RADIUS_UNIT_RANGE: f64 = 200.0;

/// Maximum of the natural unit range for scale parameters.
pub const SCALE_UNIT_RANGE: f64 = 10.0;

/// A parametrized transformation from one bitmap to another.
///
/// Implementations receive only the parameter keys their descriptor
/// declares (already resolved to natural units) and must never mutate
/// the input bitmap.
pub trait BitmapFilter {
    /// Produce a new bitmap from `bitmap` and the resolved parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FilterFailure`] if the input cannot be processed
    /// (e.g. an unsupported extent for this filter's numerics).
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure>;
}

/// The builtin filter set in menu order.
///
/// Accepted keys and unit scale factors per filter:
///
/// | id            | keys                | scales        |
/// |---------------|---------------------|---------------|
/// | crystallize   | radius              | 200           |
/// | edges         | intensity           | 1             |
/// | gaussian-blur | radius              | 200           |
/// | pixellate     | scale               | 10            |
/// | sepia         | intensity           | 1             |
/// | unsharp-mask  | radius, intensity   | 200, 1        |
/// | vignette      | intensity, radius   | 1, 200        |
/// | bokeh-blur    | radius              | 200           |
/// | motion-blur   | radius              | 200           |
#[must_use]
pub fn builtin_descriptors() -> Vec<FilterDescriptor> {
    let intensity = ParamSpec::new(ParamKey::Intensity, INTENSITY_UNIT_RANGE);
    let radius = ParamSpec::new(ParamKey::Radius, RADIUS_UNIT_RANGE);
    let scale = ParamSpec::new(ParamKey::Scale, SCALE_UNIT_RANGE);

    vec![
        FilterDescriptor::new(
            "crystallize",
            "Crystallize",
            vec![radius],
            Arc::new(crystallize::Crystallize),
        ),
        FilterDescriptor::new("edges", "Edges", vec![intensity], Arc::new(edges::Edges)),
        FilterDescriptor::new(
            "gaussian-blur",
            "Gaussian Blur",
            vec![radius],
            Arc::new(blur::GaussianBlur),
        ),
        FilterDescriptor::new(
            "pixellate",
            "Pixellate",
            vec![scale],
            Arc::new(pixellate::Pixellate),
        ),
        FilterDescriptor::new(
            "sepia",
            "Sepia Tone",
            vec![intensity],
            Arc::new(sepia::SepiaTone),
        ),
        FilterDescriptor::new(
            "unsharp-mask",
            "Unsharp Mask",
            vec![radius, intensity],
            Arc::new(unsharp::UnsharpMask),
        ),
        FilterDescriptor::new(
            "vignette",
            "Vignette",
            vec![intensity, radius],
            Arc::new(vignette::Vignette),
        ),
        FilterDescriptor::new(
            "bokeh-blur",
            "Bokeh Blur",
            vec![radius],
            Arc::new(bokeh::BokehBlur),
        ),
        FilterDescriptor::new(
            "motion-blur",
            "Motion Blur",
            vec![radius],
            Arc::new(motion::MotionBlur),
        ),
    ]
}

/// Split an RGBA image into four single-channel images.
///
/// Several builtin filters delegate to `imageproc` operations that
/// only accept `GrayImage`, so they process each channel
/// independently and reassemble (all these operations are linear and
/// per-channel, making the split mathematically transparent).
pub(crate) fn split_channels(image: &RgbaImage) -> [GrayImage; 4] {
    let (w, h) = (image.width(), image.height());
    std::array::from_fn(|c| {
        GrayImage::from_fn(w, h, |x, y| image::Luma([image.get_pixel(x, y).0[c]]))
    })
}

/// Reassemble four single-channel images into an RGBA image.
///
/// All four channels must share the same dimensions.
pub(crate) fn merge_channels(channels: &[GrayImage; 4]) -> RgbaImage {
    let (w, h) = (channels[0].width(), channels[0].height());
    RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([
            channels[0].get_pixel(x, y).0[0],
            channels[1].get_pixel(x, y).0[0],
            channels[2].get_pixel(x, y).0[0],
            channels[3].get_pixel(x, y).0[0],
        ])
    })
}

/// Convert a floating-point channel value to `u8`, rounding and
/// clamping to [0, 255].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::cast_possible_truncation)]
    fn split_then_merge_is_identity() {
        let img = RgbaImage::from_fn(6, 4, |x, y| {
            image::Rgba([(x * 40) as u8, (y * 60) as u8, 7, 255])
        });
        let merged = merge_channels(&split_channels(&img));
        assert_eq!(img, merged);
    }

    #[test]
    fn to_channel_rounds_and_clamps() {
        assert_eq!(to_channel(-3.0), 0);
        assert_eq!(to_channel(0.4), 0);
        assert_eq!(to_channel(0.6), 1);
        assert_eq!(to_channel(254.5), 255);
        assert_eq!(to_channel(300.0), 255);
    }

    #[test]
    fn builtin_descriptors_count() {
        assert_eq!(builtin_descriptors().len(), 9);
    }
}
