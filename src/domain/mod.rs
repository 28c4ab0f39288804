//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - configuration (`PlotConfig`, `AxisSpec`, `RenderTarget`, `Preset`)
//! - the three input signals (`SeriesKind`, `InputPaths`)
//! - render-ready output (`Chart`, `ChartSeries`)

pub mod types;

pub use types::*;
