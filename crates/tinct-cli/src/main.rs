//! tinct: apply a named raster filter to an image file.
//!
//! Loads an image, applies one of the registered filters with
//! slider-style normalized parameters, and optionally writes the
//! result. Prints per-run timing for parameter experimentation.
//!
//! # Usage
//!
//! ```text
//! tinct photo.jpg --filter gaussian-blur --radius 0.4 --output blurred.png
//! tinct --list
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use serde::Serialize;
use tinct_pipeline::{
    FilterDescriptor, FilterParams, FilterPipeline, FilterRegistry, ParamSpec, RgbaImage,
};

/// Apply a named raster filter to an image file.
///
/// Parameters are normalized to [0, 1] the way a slider exposes them;
/// each filter maps the values it accepts onto its natural unit range
/// and ignores the rest.
#[derive(Parser)]
#[command(name = "tinct", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    #[arg(required_unless_present = "list")]
    image_path: Option<PathBuf>,

    /// List the available filters and their accepted parameters, then exit.
    #[arg(long)]
    list: bool,

    /// Filter id to apply (see --list).
    #[arg(long, default_value = "sepia")]
    filter: String,

    /// Normalized intensity in [0, 1].
    #[arg(long, default_value_t = FilterParams::DEFAULT_VALUE)]
    intensity: f64,

    /// Normalized radius in [0, 1].
    #[arg(long, default_value_t = FilterParams::DEFAULT_VALUE)]
    radius: f64,

    /// Normalized scale in [0, 1].
    #[arg(long, default_value_t = FilterParams::DEFAULT_VALUE)]
    scale: f64,

    /// Write the filtered image to this path (format from extension).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of runs for timing (the output is written once).
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Emit the report (or filter list) as JSON instead of text.
    #[arg(long)]
    json: bool,
}

/// One filter's metadata, for `--list --json`.
#[derive(Serialize)]
struct FilterInfo<'a> {
    id: &'a str,
    display_name: &'a str,
    params: &'a [ParamSpec],
}

/// Timing report for an apply invocation.
#[derive(Serialize)]
struct RunReport<'a> {
    filter: &'a str,
    display_name: &'a str,
    width: u32,
    height: u32,
    params: FilterParams,
    runs: usize,
    mean_secs: f64,
    min_secs: f64,
    max_secs: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let registry = FilterRegistry::builtin();

    if cli.list {
        return list_filters(&registry, cli.json);
    }

    let Some(ref image_path) = cli.image_path else {
        // Clap enforces `required_unless_present = "list"`.
        eprintln!("missing image path");
        return ExitCode::FAILURE;
    };

    let image_bytes = match std::fs::read(image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", image_path.display());
            return ExitCode::FAILURE;
        }
    };

    let bitmap: RgbaImage = match image::load_from_memory(&image_bytes) {
        Ok(decoded) => decoded.to_rgba8(),
        Err(e) => {
            eprintln!("Error decoding {}: {e}", image_path.display());
            return ExitCode::FAILURE;
        }
    };

    let pipeline = FilterPipeline::new(registry);
    let params = FilterParams {
        intensity: cli.intensity,
        radius: cli.radius,
        scale: cli.scale,
    };

    let mut durations = Vec::with_capacity(cli.runs);
    let mut output_image = None;
    for _ in 0..cli.runs {
        let started = Instant::now();
        match pipeline.apply(&bitmap, &cli.filter, &params) {
            Ok(filtered) => {
                durations.push(started.elapsed());
                output_image = Some(filtered);
            }
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    // The filter id resolved during apply, so lookup cannot fail here.
    let display_name = pipeline
        .registry()
        .lookup(&cli.filter)
        .map_or("?", FilterDescriptor::display_name);

    let report = RunReport {
        filter: &cli.filter,
        display_name,
        width: bitmap.width(),
        height: bitmap.height(),
        params,
        runs: cli.runs,
        mean_secs: mean_secs(&durations),
        min_secs: durations.iter().min().map_or(0.0, Duration::as_secs_f64),
        max_secs: durations.iter().max().map_or(0.0, Duration::as_secs_f64),
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&report);
    }

    if let (Some(path), Some(filtered)) = (cli.output.as_ref(), output_image.as_ref()) {
        if let Err(e) = filtered.save(path) {
            eprintln!("Error writing {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        eprintln!("Output written to {}", path.display());
    }

    ExitCode::SUCCESS
}

/// Print the registered filters in registration (menu) order.
fn list_filters(registry: &FilterRegistry, json: bool) -> ExitCode {
    if json {
        let infos: Vec<FilterInfo<'_>> = registry
            .iter()
            .map(|descriptor| FilterInfo {
                id: descriptor.id(),
                display_name: descriptor.display_name(),
                params: descriptor.params(),
            })
            .collect();
        match serde_json::to_string_pretty(&infos) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error serializing filter list: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for descriptor in registry.iter() {
            let keys: Vec<String> = descriptor
                .params()
                .iter()
                .map(|spec| format!("{} (x{})", spec.key, spec.scale))
                .collect();
            println!(
                "{:<14} {:<14} {}",
                descriptor.id(),
                descriptor.display_name(),
                if keys.is_empty() {
                    "-".to_string()
                } else {
                    keys.join(", ")
                },
            );
        }
    }
    ExitCode::SUCCESS
}

/// Mean wall-clock duration in seconds.
#[allow(clippy::cast_precision_loss)]
fn mean_secs(durations: &[Duration]) -> f64 {
    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().map(Duration::as_secs_f64).sum::<f64>() / durations.len() as f64
}

/// Human-readable report.
fn print_report(report: &RunReport<'_>) {
    println!(
        "Filter: {} ({})",
        report.display_name, report.filter,
    );
    println!("Input:  {}x{}", report.width, report.height);
    println!(
        "Params: intensity {:.2}, radius {:.2}, scale {:.2}",
        report.params.intensity, report.params.radius, report.params.scale,
    );
    println!(
        "Timing: {} run(s), mean {:.1} ms, min {:.1} ms, max {:.1} ms",
        report.runs,
        report.mean_secs * 1e3,
        report.min_secs * 1e3,
        report.max_secs * 1e3,
    );
}
