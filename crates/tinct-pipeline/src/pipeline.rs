//! Filter application: normalized parameters in, filtered bitmap out.
//!
//! [`FilterPipeline`] is the single request/response operation of the
//! core: look up the selected filter's descriptor, resolve its
//! declared parameters from normalized [0, 1] values into natural
//! units, and invoke the implementation. Every call is a pure
//! function of its inputs — no I/O, no caching, no shared mutable
//! state — so a pipeline may be shared and invoked concurrently
//! without locking.

use crate::registry::{FilterDescriptor, FilterRegistry};
use crate::types::{FilterError, FilterParams, ResolvedParams, RgbaImage};

/// Stateless filter application over a fixed registry.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    registry: FilterRegistry,
}

impl FilterPipeline {
    /// Create a pipeline over the given registry.
    #[must_use]
    pub const fn new(registry: FilterRegistry) -> Self {
        Self { registry }
    }

    /// The registry this pipeline resolves filter ids against.
    #[must_use]
    pub const fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// Apply the filter registered under `filter_id` to `bitmap`.
    ///
    /// Only the parameter keys the filter's descriptor declares are
    /// consulted; the rest of `params` is ignored. Each consulted
    /// value is clamped to [0, 1] and multiplied by the descriptor's
    /// scale factor before being handed to the implementation.
    ///
    /// The input is never mutated. Output dimensions equal input
    /// dimensions unless the filter inherently changes extent (none
    /// of the builtin filters do).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownFilter`] if `filter_id` is not
    /// registered, and [`FilterError::Execution`] if the bitmap has a
    /// degenerate (zero-pixel) extent or the implementation reports
    /// failure.
    pub fn apply(
        &self,
        bitmap: &RgbaImage,
        filter_id: &str,
        params: &FilterParams,
    ) -> Result<RgbaImage, FilterError> {
        let descriptor = self.registry.lookup(filter_id)?;

        if bitmap.width() == 0 || bitmap.height() == 0 {
            return Err(FilterError::Execution {
                filter: filter_id.to_string(),
                reason: "degenerate image extent (zero pixels)".to_string(),
            });
        }

        let resolved = resolve_params(descriptor, params);
        descriptor
            .filter()
            .apply(bitmap, &resolved)
            .map_err(|failure| FilterError::Execution {
                filter: filter_id.to_string(),
                reason: failure.to_string(),
            })
    }
}

/// Resolve normalized parameters into natural units for one filter.
///
/// For each key the descriptor declares, the normalized input is
/// clamped to [0, 1] and multiplied by that key's scale factor.
/// Undeclared keys stay `None` so implementations cannot observe
/// values they did not ask for.
#[must_use]
pub fn resolve_params(descriptor: &FilterDescriptor, params: &FilterParams) -> ResolvedParams {
    let mut resolved = ResolvedParams::default();
    for spec in descriptor.params() {
        let normalized = params.get(spec.key).clamp(0.0, 1.0);
        resolved.set(spec.key, normalized * spec.scale);
    }
    resolved
}
