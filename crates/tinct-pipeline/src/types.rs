//! Shared types for the tinct filter pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference bitmaps
/// without depending on `image` directly.
///
/// All pipeline bitmaps are row-major RGBA8. The pipeline never
/// mutates an input bitmap; every filter application returns a new
/// image.
pub use image::RgbaImage;

/// The closed set of normalized parameter keys a filter may accept.
///
/// These mirror the three slider-style controls exposed to a caller.
/// A filter declares which subset it accepts via its descriptor's
/// [`ParamSpec`](crate::registry::ParamSpec) list; values supplied
/// under undeclared keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    /// Blend strength or effect amount, natural range [0, 1].
    Intensity,
    /// Spatial footprint in pixels (blur sigma support, cell size, ...).
    Radius,
    /// Block/cell magnification factor.
    Scale,
}

impl ParamKey {
    /// All keys, in display order.
    pub const ALL: [Self; 3] = [Self::Intensity, Self::Radius, Self::Scale];

    /// Lowercase identifier for the key ("intensity", "radius", "scale").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intensity => "intensity",
            Self::Radius => "radius",
            Self::Scale => "scale",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-facing normalized parameter values, one per key.
///
/// Each value is expected in [0, 1] (out-of-range values are clamped
/// during resolution, not here). All three values are always present
/// — the pipeline consults only the keys the selected filter's
/// descriptor declares and ignores the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Normalized intensity in [0, 1].
    pub intensity: f64,
    /// Normalized radius in [0, 1].
    pub radius: f64,
    /// Normalized scale in [0, 1].
    pub scale: f64,
}

impl FilterParams {
    /// Default normalized value for every key (mid-slider).
    pub const DEFAULT_VALUE: f64 = 0.5;

    /// Look up the normalized value for a key.
    #[must_use]
    pub const fn get(&self, key: ParamKey) -> f64 {
        match key {
            ParamKey::Intensity => self.intensity,
            ParamKey::Radius => self.radius,
            ParamKey::Scale => self.scale,
        }
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            intensity: Self::DEFAULT_VALUE,
            radius: Self::DEFAULT_VALUE,
            scale: Self::DEFAULT_VALUE,
        }
    }
}

/// Natural-unit parameter values handed to a filter implementation.
///
/// Produced by [`resolve_params`](crate::pipeline::resolve_params):
/// holds `Some` only for the keys the selected descriptor declares,
/// each clamped to [0, 1] and multiplied by the descriptor's scale
/// factor. Filter implementations must not observe values for keys
/// they did not declare.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedParams {
    intensity: Option<f64>,
    radius: Option<f64>,
    scale: Option<f64>,
}

impl ResolvedParams {
    /// Resolved intensity, if the filter declared it.
    #[must_use]
    pub const fn intensity(&self) -> Option<f64> {
        self.intensity
    }

    /// Resolved radius, if the filter declared it.
    #[must_use]
    pub const fn radius(&self) -> Option<f64> {
        self.radius
    }

    /// Resolved scale, if the filter declared it.
    #[must_use]
    pub const fn scale(&self) -> Option<f64> {
        self.scale
    }

    /// Look up the resolved value for a key.
    #[must_use]
    pub const fn get(&self, key: ParamKey) -> Option<f64> {
        match key {
            ParamKey::Intensity => self.intensity,
            ParamKey::Radius => self.radius,
            ParamKey::Scale => self.scale,
        }
    }

    /// Set the resolved value for a key.
    pub(crate) const fn set(&mut self, key: ParamKey, value: f64) {
        match key {
            ParamKey::Intensity => self.intensity = Some(value),
            ParamKey::Radius => self.radius = Some(value),
            ParamKey::Scale => self.scale = Some(value),
        }
    }
}

/// Failure reported by a filter implementation.
///
/// Implementations of [`BitmapFilter`](crate::filters::BitmapFilter)
/// return this on unsupported input; the pipeline wraps it into
/// [`FilterError::Execution`] together with the filter id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct FilterFailure(String);

impl FilterFailure {
    /// Create a failure with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Errors that can occur during filter registration or application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// No filter is registered under the requested id.
    #[error("no filter registered under id `{0}`")]
    UnknownFilter(String),

    /// A filter is already registered under this id.
    ///
    /// Registration-time only. A registry built from static data
    /// should treat this as fatal to startup.
    #[error("a filter is already registered under id `{0}`")]
    DuplicateFilter(String),

    /// The filter implementation reported failure.
    #[error("filter `{filter}` failed: {reason}")]
    Execution {
        /// Id of the filter that failed.
        filter: String,
        /// Reason reported by the implementation.
        reason: String,
    },
}
