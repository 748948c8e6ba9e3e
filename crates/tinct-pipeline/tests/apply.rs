//! Integration tests: registry + pipeline wired together the way a
//! presentation layer would use them.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use tinct_pipeline::{
    BitmapFilter, FilterDescriptor, FilterError, FilterFailure, FilterParams, FilterPipeline,
    FilterRegistry, ParamKey, ParamSpec, ResolvedParams, RgbaImage,
};

/// Filter stub that records the resolved parameters it receives and
/// returns the input unchanged.
struct Recorder {
    seen: Arc<Mutex<Option<ResolvedParams>>>,
}

impl BitmapFilter for Recorder {
    fn apply(
        &self,
        bitmap: &RgbaImage,
        params: &ResolvedParams,
    ) -> Result<RgbaImage, FilterFailure> {
        *self.seen.lock().unwrap() = Some(*params);
        Ok(bitmap.clone())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn gradient_bitmap(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 7 % 256) as u8, (y * 11 % 256) as u8, 128, 255])
    })
}

#[test]
fn end_to_end_blur_resolves_radius_to_unit_maximum() {
    // Register {sepia: intensity} and {blur: radius, scale 200}; apply
    // blur with normalized radius 1.0 and expect the implementation to
    // see the maximum of the declared unit range.
    let seen = Arc::new(Mutex::new(None));
    let mut registry = FilterRegistry::new();
    registry
        .register(FilterDescriptor::new(
            "sepia",
            "Sepia Tone",
            vec![ParamSpec::new(ParamKey::Intensity, 1.0)],
            Arc::new(Recorder {
                seen: Arc::new(Mutex::new(None)),
            }),
        ))
        .unwrap();
    registry
        .register(FilterDescriptor::new(
            "blur",
            "Blur",
            vec![ParamSpec::new(ParamKey::Radius, 200.0)],
            Arc::new(Recorder {
                seen: Arc::clone(&seen),
            }),
        ))
        .unwrap();

    let pipeline = FilterPipeline::new(registry);
    let bitmap = gradient_bitmap(24, 16);
    let params = FilterParams {
        radius: 1.0,
        ..FilterParams::default()
    };

    let output = pipeline.apply(&bitmap, "blur", &params).unwrap();

    assert_eq!(output.dimensions(), bitmap.dimensions());
    let resolved = seen.lock().unwrap().expect("filter was not invoked");
    assert_eq!(resolved.radius(), Some(200.0));
    assert!(resolved.intensity().is_none(), "blur did not declare intensity");
}

#[test]
fn parameterless_filter_ignores_all_supplied_values() {
    let seen = Arc::new(Mutex::new(None));
    let mut registry = FilterRegistry::new();
    registry
        .register(FilterDescriptor::new(
            "identity",
            "Identity",
            vec![],
            Arc::new(Recorder {
                seen: Arc::clone(&seen),
            }),
        ))
        .unwrap();
    let pipeline = FilterPipeline::new(registry);

    let params = FilterParams {
        intensity: 1.0,
        radius: 1.0,
        scale: 1.0,
    };
    let bitmap = gradient_bitmap(8, 8);
    let output = pipeline.apply(&bitmap, "identity", &params).unwrap();

    assert_eq!(output, bitmap);
    let resolved = seen.lock().unwrap().expect("filter was not invoked");
    for key in ParamKey::ALL {
        assert!(resolved.get(key).is_none(), "{key} leaked to the filter");
    }
}

#[test]
fn unknown_filter_id_is_surfaced() {
    let pipeline = FilterPipeline::new(FilterRegistry::builtin());
    let bitmap = gradient_bitmap(8, 8);
    let result = pipeline.apply(&bitmap, "not-a-filter", &FilterParams::default());
    assert!(matches!(result, Err(FilterError::UnknownFilter(ref id)) if id == "not-a-filter"));
}

#[test]
fn builtin_filters_are_deterministic_and_preserve_dimensions() {
    let pipeline = FilterPipeline::new(FilterRegistry::builtin());
    let bitmap = gradient_bitmap(32, 24);
    let params = FilterParams {
        intensity: 0.7,
        radius: 0.1,
        scale: 0.4,
    };

    let ids: Vec<String> = pipeline
        .registry()
        .iter()
        .map(|descriptor| descriptor.id().to_string())
        .collect();
    for id in &ids {
        let first = pipeline.apply(&bitmap, id, &params).unwrap();
        let second = pipeline.apply(&bitmap, id, &params).unwrap();
        assert_eq!(first.dimensions(), bitmap.dimensions(), "{id} changed extent");
        assert_eq!(first.as_raw(), second.as_raw(), "{id} is nondeterministic");
    }
}

#[test]
fn reapplying_a_filter_is_not_special_cased() {
    // Filters are not required to be idempotent; the pipeline must
    // process an already-filtered bitmap like any other input.
    let pipeline = FilterPipeline::new(FilterRegistry::builtin());
    let bitmap = gradient_bitmap(32, 24);
    let params = FilterParams {
        radius: 0.05,
        ..FilterParams::default()
    };

    let once = pipeline.apply(&bitmap, "gaussian-blur", &params).unwrap();
    let twice = pipeline.apply(&once, "gaussian-blur", &params).unwrap();

    assert_ne!(once.as_raw(), twice.as_raw(), "second application was skipped");
}

#[test]
fn pipeline_is_shareable_across_threads() {
    let pipeline = Arc::new(FilterPipeline::new(FilterRegistry::builtin()));
    let bitmap = gradient_bitmap(16, 16);

    let handles: Vec<_> = ["sepia", "vignette", "pixellate", "edges"]
        .into_iter()
        .map(|id| {
            let pipeline = Arc::clone(&pipeline);
            let bitmap = bitmap.clone();
            std::thread::spawn(move || pipeline.apply(&bitmap, id, &FilterParams::default()))
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert!(result.is_ok(), "concurrent apply failed: {result:?}");
    }
}
