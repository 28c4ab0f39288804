//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built once from validated CLI flags (`PlotConfig`)
//! - rendered to any target (`Chart`)
//! - exported to JSON/CSV

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which of the three input signals a series holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesKind {
    Original,
    LowPass,
    HighPass,
}

impl SeriesKind {
    /// Drawing and loading order.
    pub const ALL: [SeriesKind; 3] = [SeriesKind::Original, SeriesKind::LowPass, SeriesKind::HighPass];

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::Original => "OriginalData",
            SeriesKind::LowPass => "LowPassFilteredData",
            SeriesKind::HighPass => "HighPassFilteredData",
        }
    }

    /// The command-line flag that supplies this series' file.
    pub fn flag(self) -> &'static str {
        match self {
            SeriesKind::Original => "--originalData",
            SeriesKind::LowPass => "--lowPassFilteredData",
            SeriesKind::HighPass => "--highPassFilteredData",
        }
    }
}

/// Named axis presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// 250 samples starting at 0.1 with a 0.1 step (the filter example's defaults).
    Default,
}

impl Preset {
    pub fn start_value(self) -> f64 {
        match self {
            Preset::Default => 0.1,
        }
    }

    pub fn step_size(self) -> f64 {
        match self {
            Preset::Default => 0.1,
        }
    }

    pub fn num_samples(self) -> f64 {
        match self {
            Preset::Default => 250.0,
        }
    }
}

/// The three input files, one per `SeriesKind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub original: PathBuf,
    pub low_pass: PathBuf,
    pub high_pass: PathBuf,
}

impl InputPaths {
    pub fn get(&self, kind: SeriesKind) -> &Path {
        match kind {
            SeriesKind::Original => &self.original,
            SeriesKind::LowPass => &self.low_pass,
            SeriesKind::HighPass => &self.high_pass,
        }
    }
}

/// Validated x-axis parameters.
///
/// `step > 0` and finite `start` are guaranteed by construction in
/// `app::plot_config_from_args`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpec {
    pub start: f64,
    pub step: f64,
    pub count: usize,
}

impl AxisSpec {
    /// Exclusive end of the half-open axis range.
    pub fn end(&self) -> f64 {
        self.start + self.count as f64 * self.step
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(ImageFormat::Svg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Where the chart goes.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderTarget {
    /// Character plot on stdout.
    Terminal { width: usize, height: usize },
    /// SVG/PNG file.
    Image {
        path: PathBuf,
        format: ImageFormat,
        width: u32,
        height: u32,
    },
    /// Full-screen viewer; returns when the user closes it.
    Interactive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportTarget {
    pub path: PathBuf,
    pub format: ExportFormat,
}

/// Upper bound for display points per sample interval.
pub const MAX_RESOLUTION: usize = 64;

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus preset defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub inputs: InputPaths,
    pub axis: AxisSpec,
    /// Display points per sample interval (1 = knots only).
    pub resolution: usize,
    pub x_label: String,
    pub y_label: String,
    pub target: RenderTarget,
    pub export: Option<ExportTarget>,
}

/// One smoothed input series, ready to draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: SeriesKind,
    pub label: String,
    pub source: PathBuf,
    /// Values as read from `source`.
    pub samples: Vec<f64>,
    /// Interpolant evaluated at the axis knots; same length as the axis.
    pub smoothed: Vec<f64>,
    /// Polyline used for drawing (knots plus any intermediate points).
    pub display: Vec<(f64, f64)>,
}

/// Everything a renderer needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    pub x_label: String,
    pub y_label: String,
    pub axis: Vec<f64>,
    pub series: Vec<ChartSeries>,
}

impl Chart {
    pub fn series(&self, kind: SeriesKind) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.kind == kind)
    }
}
