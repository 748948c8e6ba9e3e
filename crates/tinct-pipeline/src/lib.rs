//! tinct-pipeline: pure raster filter core (sans-IO).
//!
//! Applies a named, parametrized filter to an RGBA8 bitmap and
//! produces a new bitmap. Two components:
//!
//! - [`FilterRegistry`] maps filter ids to descriptors (display name,
//!   accepted parameter keys with unit scale factors, implementation
//!   reference). Built once at startup, read-only afterward.
//! - [`FilterPipeline`] looks up the selected descriptor, resolves
//!   normalized [0, 1] parameters into natural units, and invokes the
//!   implementation. Stateless: every call is a pure function of its
//!   inputs, safe to run concurrently.
//!
//! This crate has **no I/O dependencies** — it operates on in-memory
//! bitmaps and returns structured data. Decoding, encoding, and all
//! presentation live in callers such as `tinct-cli`.
//!
//! # Example
//!
//! ```
//! use tinct_pipeline::{FilterParams, FilterPipeline, FilterRegistry, RgbaImage};
//!
//! let pipeline = FilterPipeline::new(FilterRegistry::builtin());
//! let bitmap = RgbaImage::from_pixel(4, 4, image::Rgba([200, 120, 40, 255]));
//! let params = FilterParams {
//!     intensity: 0.8,
//!     ..FilterParams::default()
//! };
//! let toned = pipeline.apply(&bitmap, "sepia", &params)?;
//! assert_eq!(toned.dimensions(), bitmap.dimensions());
//! # Ok::<(), tinct_pipeline::FilterError>(())
//! ```

pub mod filters;
pub mod latest;
pub mod pipeline;
pub mod registry;
pub mod types;

pub use filters::BitmapFilter;
pub use latest::{Generation, LatestGate};
pub use pipeline::{FilterPipeline, resolve_params};
pub use registry::{FilterDescriptor, FilterRegistry, ParamSpec};
pub use types::{FilterError, FilterFailure, FilterParams, ParamKey, ResolvedParams, RgbaImage};
