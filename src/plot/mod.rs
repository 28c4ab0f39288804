//! Chart rendering.
//!
//! - fixed-size character plot for the terminal (`ascii`)
//! - SVG/PNG files through Plotters (`image`)
//!
//! Both share the bounds and the per-series palette defined here; the
//! interactive viewer (`crate::tui`) uses them too.

pub mod ascii;
pub mod image;

pub use ascii::*;
pub use image::*;

use crate::domain::{ChartSeries, SeriesKind};

/// Plot ranges for a set of series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl ChartBounds {
    /// Bounds over every display point; `None` when there is nothing to draw.
    ///
    /// The y-range gets 5% padding; degenerate ranges are widened so callers
    /// can always map into them.
    pub fn of<'a>(series: impl IntoIterator<Item = &'a ChartSeries>) -> Option<Self> {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for s in series {
            for &(x, y) in &s.display {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }

        if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
            return None;
        }

        let (x_min, x_max) = if x_max > x_min { (x_min, x_max) } else { pad_range(x_min, x_max, 0.05) };
        let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
        Some(Self {
            x: [x_min, x_max],
            y: [y_min, y_max],
        })
    }
}

/// Line colour per series (tab10 blue/orange/green).
pub fn series_rgb(kind: SeriesKind) -> (u8, u8, u8) {
    match kind {
        SeriesKind::Original => (31, 119, 180),
        SeriesKind::LowPass => (255, 127, 14),
        SeriesKind::HighPass => (44, 160, 44),
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span > 0.0 {
        span * frac
    } else {
        (min.abs() * frac).max(0.5)
    };
    (min - pad, max + pad)
}
