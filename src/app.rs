//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses and validates CLI arguments
//! - runs the load/validate/interpolate pipeline
//! - renders the chart to the chosen target
//! - writes the optional export

use clap::Parser;

use crate::cli::Cli;
use crate::domain::{
    AxisSpec, Chart, ExportFormat, ExportTarget, ImageFormat, InputPaths, PlotConfig, RenderTarget,
};
use crate::error::{AppError, ErrorKind};

pub mod pipeline;

/// Entry point for the `filter-plot` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = plot_config_from_args(&cli)?;

    let chart = pipeline::build_chart(&config)?;
    render_chart(&chart, &config.target)?;

    // Export only after a successful render so a failed run leaves nothing behind.
    if let Some(export) = &config.export {
        crate::io::export::write_chart(export, &chart)?;
    }

    Ok(())
}

/// Draw `chart` to `target`.
pub fn render_chart(chart: &Chart, target: &RenderTarget) -> Result<(), AppError> {
    match target {
        RenderTarget::Terminal { width, height } => {
            log::info!("rendering {width}x{height} terminal plot");
            println!("{}", crate::plot::render_ascii_chart(chart, *width, *height));
            Ok(())
        }
        RenderTarget::Image {
            path,
            format,
            width,
            height,
        } => crate::plot::write_image(chart, path, *format, (*width, *height)),
        RenderTarget::Interactive => {
            log::info!("opening interactive viewer");
            crate::tui::run(chart)
        }
    }
}

/// Resolve presets, validate numeric flags and pick render/export targets.
///
/// Everything that can be rejected without touching the input files is
/// rejected here.
pub fn plot_config_from_args(args: &Cli) -> Result<PlotConfig, AppError> {
    let start = pick(args.start_value, args.preset.map(|p| p.start_value()), "--startValue")?;
    let step = pick(args.step_size, args.preset.map(|p| p.step_size()), "--stepSize")?;
    let num_samples = pick(args.num_samples, args.preset.map(|p| p.num_samples()), "--numSamples")?;

    if !start.is_finite() {
        return Err(AppError::new(
            ErrorKind::InvalidConfig,
            format!("--startValue must be finite, got {start}."),
        ));
    }
    if !(step.is_finite() && step > 0.0) {
        return Err(AppError::new(
            ErrorKind::InvalidConfig,
            format!("--stepSize must be finite and > 0, got {step}."),
        ));
    }
    let count = sample_count(num_samples)?;

    let target = if args.tui {
        if let Some(path) = &args.output {
            log::warn!("--tui given; ignoring output file '{}'", path.display());
        }
        RenderTarget::Interactive
    } else if let Some(path) = &args.output {
        let format = ImageFormat::from_path(path).ok_or_else(|| {
            AppError::new(
                ErrorKind::InvalidConfig,
                format!("Unsupported output file '{}': expected .svg or .png.", path.display()),
            )
        })?;
        if args.image_width == 0 || args.image_height == 0 {
            return Err(AppError::new(ErrorKind::InvalidConfig, "Image size must be non-zero."));
        }
        RenderTarget::Image {
            path: path.clone(),
            format,
            width: args.image_width,
            height: args.image_height,
        }
    } else {
        RenderTarget::Terminal {
            width: args.width,
            height: args.height,
        }
    };

    let export = match &args.export {
        Some(path) => {
            let format = ExportFormat::from_path(path).ok_or_else(|| {
                AppError::new(
                    ErrorKind::InvalidConfig,
                    format!("Unsupported export file '{}': expected .csv or .json.", path.display()),
                )
            })?;
            Some(ExportTarget {
                path: path.clone(),
                format,
            })
        }
        None => None,
    };

    Ok(PlotConfig {
        inputs: InputPaths {
            original: args.original_data.clone(),
            low_pass: args.low_pass_filtered_data.clone(),
            high_pass: args.high_pass_filtered_data.clone(),
        },
        axis: AxisSpec { start, step, count },
        resolution: usize::from(args.resolution),
        x_label: args.x_label.clone(),
        y_label: args.y_label.clone(),
        target,
        export,
    })
}

/// `--numSamples` arrives as a float; only non-negative integral values are counts.
pub fn sample_count(value: f64) -> Result<usize, AppError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(AppError::new(
            ErrorKind::InvalidConfig,
            format!("--numSamples must be a non-negative whole number, got {value}."),
        ));
    }
    Ok(value as usize)
}

fn pick(explicit: Option<f64>, preset: Option<f64>, flag: &str) -> Result<f64, AppError> {
    explicit
        .or(preset)
        .ok_or_else(|| AppError::new(ErrorKind::InvalidConfig, format!("Missing {flag} (or --preset).")))
}
