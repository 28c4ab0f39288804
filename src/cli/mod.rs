//! Command-line parsing for the filter comparison plotter.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! validation (`app::plot_config_from_args`) and from the pipeline itself.
//!
//! The three data flags and the axis flags keep the camelCase spelling the
//! filter example's documentation uses.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{MAX_RESOLUTION, Preset};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "filter-plot",
    version,
    about = "Plot original, low-pass and high-pass filtered samples as smoothed curves"
)]
pub struct Cli {
    /// Original signal samples (comma-separated text file).
    #[arg(long = "originalData", value_name = "PATH")]
    pub original_data: PathBuf,

    /// Low-pass filtered samples.
    #[arg(long = "lowPassFilteredData", value_name = "PATH")]
    pub low_pass_filtered_data: PathBuf,

    /// High-pass filtered samples.
    #[arg(long = "highPassFilteredData", value_name = "PATH")]
    pub high_pass_filtered_data: PathBuf,

    /// First x-coordinate.
    #[arg(
        long = "startValue",
        value_name = "FLOAT",
        required_unless_present = "preset",
        allow_negative_numbers = true
    )]
    pub start_value: Option<f64>,

    /// X-axis increment (must be > 0).
    #[arg(
        long = "stepSize",
        value_name = "FLOAT",
        required_unless_present = "preset",
        allow_negative_numbers = true
    )]
    pub step_size: Option<f64>,

    /// Expected number of samples in every file (integral value).
    #[arg(
        long = "numSamples",
        value_name = "FLOAT",
        required_unless_present = "preset",
        allow_negative_numbers = true
    )]
    pub num_samples: Option<f64>,

    /// Fill axis flags from a preset; explicit flags still win.
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Write the chart to an image file (.svg or .png) instead of the terminal.
    #[arg(short, long, env = "FILTER_PLOT_OUTPUT", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Open the interactive terminal viewer.
    #[arg(long)]
    pub tui: bool,

    /// Display points per sample interval (1 = draw through the samples only).
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..=MAX_RESOLUTION as i64)
    )]
    pub resolution: u16,

    /// Terminal plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Terminal plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Image width (pixels).
    #[arg(long, default_value_t = 1200)]
    pub image_width: u32,

    /// Image height (pixels).
    #[arg(long, default_value_t = 800)]
    pub image_height: u32,

    /// X-axis label.
    #[arg(long, default_value = "Samples")]
    pub x_label: String,

    /// Y-axis label.
    #[arg(long, default_value = "Data points")]
    pub y_label: String,

    /// Export the smoothed series (.csv or .json) after rendering.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}
