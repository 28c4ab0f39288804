//! The chart pipeline shared by every render target.
//!
//! load (all three files) -> validate lengths -> build axis -> interpolate
//!
//! Nothing is drawn here; callers get a finished `Chart` or the first error.
//! Length validation always completes before the interpolator is called.

use std::path::PathBuf;

use crate::domain::{Chart, ChartSeries, InputPaths, MAX_RESOLUTION, PlotConfig, SeriesKind};
use crate::error::{AppError, ErrorKind};
use crate::io::loader::{check_readable, load_series};
use crate::math::{Interpolator, QuadraticInterpolator, build_axis};

/// One input file after loading.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub kind: SeriesKind,
    pub path: PathBuf,
    pub values: Vec<f64>,
}

/// Load the three input files in `SeriesKind::ALL` order.
///
/// All paths are checked for readability before any file is parsed.
pub fn load_inputs(inputs: &InputPaths) -> Result<Vec<LoadedSeries>, AppError> {
    for kind in SeriesKind::ALL {
        check_readable(inputs.get(kind)).map_err(|e| with_flag(kind, e))?;
    }

    SeriesKind::ALL
        .iter()
        .map(|&kind| {
            let path = inputs.get(kind);
            let values = load_series(path).map_err(|e| with_flag(kind, e))?;
            Ok(LoadedSeries {
                kind,
                path: path.to_path_buf(),
                values,
            })
        })
        .collect()
}

/// Every series must hold exactly `expected` samples.
pub fn validate_lengths(series: &[LoadedSeries], expected: usize) -> Result<(), AppError> {
    for s in series {
        if s.values.len() != expected {
            return Err(AppError::new(
                ErrorKind::InsufficientData,
                format!(
                    "{} file '{}' contains {} samples, expected {expected} (--numSamples).",
                    s.kind.label(),
                    s.path.display(),
                    s.values.len(),
                ),
            ));
        }
    }
    Ok(())
}

/// Execute the full pipeline with quadratic smoothing.
pub fn build_chart(config: &PlotConfig) -> Result<Chart, AppError> {
    let interpolator = QuadraticInterpolator {
        resolution: config.resolution,
    };
    build_chart_with(config, &interpolator)
}

/// Execute the pipeline with a caller-supplied interpolator.
pub fn build_chart_with(config: &PlotConfig, interpolator: &dyn Interpolator) -> Result<Chart, AppError> {
    if !(1..=MAX_RESOLUTION).contains(&config.resolution) {
        return Err(AppError::new(
            ErrorKind::InvalidConfig,
            format!("Resolution must be between 1 and {MAX_RESOLUTION}, got {}.", config.resolution),
        ));
    }

    let loaded = load_inputs(&config.inputs)?;
    validate_lengths(&loaded, config.axis.count)?;
    log::info!(
        "loaded 3 series of {} samples; axis [{}, {}) step {}",
        config.axis.count,
        config.axis.start,
        config.axis.end(),
        config.axis.step
    );

    let axis = build_axis(&config.axis);

    let series = loaded
        .into_iter()
        .map(|s| {
            let smoothed = interpolator.smooth(&axis, &s.values).map_err(|e| {
                AppError::new(
                    e.kind(),
                    format!("{} ('{}'): {e}", s.kind.label(), s.path.display()),
                )
            })?;
            Ok(ChartSeries {
                kind: s.kind,
                label: s.kind.label().to_string(),
                source: s.path,
                samples: s.values,
                smoothed: smoothed.at_knots,
                display: smoothed.display,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(Chart {
        x_label: config.x_label.clone(),
        y_label: config.y_label.clone(),
        axis,
        series,
    })
}

fn with_flag(kind: SeriesKind, err: AppError) -> AppError {
    AppError::new(err.kind(), format!("{}: {err}", kind.flag()))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Write;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::domain::{AxisSpec, RenderTarget};
    use crate::math::SmoothedSeries;

    struct CountingInterpolator {
        calls: Cell<usize>,
    }

    impl Interpolator for CountingInterpolator {
        fn smooth(&self, axis: &[f64], samples: &[f64]) -> Result<SmoothedSeries, AppError> {
            self.calls.set(self.calls.get() + 1);
            Ok(SmoothedSeries {
                at_knots: samples.to_vec(),
                display: axis.iter().copied().zip(samples.iter().copied()).collect(),
            })
        }
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn config(original: &Path, low: &Path, high: &Path, count: usize) -> PlotConfig {
        PlotConfig {
            inputs: InputPaths {
                original: original.to_path_buf(),
                low_pass: low.to_path_buf(),
                high_pass: high.to_path_buf(),
            },
            axis: AxisSpec { start: 0.0, step: 0.5, count },
            resolution: 1,
            x_label: "Samples".to_string(),
            y_label: "Data points".to_string(),
            target: RenderTarget::Terminal { width: 40, height: 10 },
            export: None,
        }
    }

    #[test]
    fn well_formed_inputs_smooth_to_same_length() {
        let dir = tempfile::tempdir().unwrap();
        let o = write(&dir, "o.txt", "0,0.25,1,2.25,4,\n");
        let l = write(&dir, "l.txt", "1,1,1,\n1,1,");
        let h = write(&dir, "h.txt", "-1,0.5,2,0.5,-1");

        let chart = build_chart(&config(&o, &l, &h, 5)).unwrap();
        assert_eq!(chart.axis, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(chart.series.len(), 3);
        for s in &chart.series {
            assert_eq!(s.smoothed.len(), 5);
            for (a, b) in s.smoothed.iter().zip(&s.samples) {
                assert!((a - b).abs() < 1e-9);
            }
        }
        assert_eq!(chart.series(SeriesKind::LowPass).unwrap().label, "LowPassFilteredData");
    }

    #[test]
    fn short_series_fails_before_interpolation() {
        let dir = tempfile::tempdir().unwrap();
        let o = write(&dir, "o.txt", "1,2,3,4");
        let l = write(&dir, "l.txt", "1,2,3");
        let h = write(&dir, "h.txt", "1,2,3,4");

        let counter = CountingInterpolator { calls: Cell::new(0) };
        let err = build_chart_with(&config(&o, &l, &h, 4), &counter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert!(err.message().contains("l.txt"), "{err}");
        assert_eq!(counter.calls.get(), 0);
    }

    #[test]
    fn long_series_is_also_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let o = write(&dir, "o.txt", "1,2,3,4");
        let l = write(&dir, "l.txt", "1,2,3,4");
        let h = write(&dir, "h.txt", "1,2,3,4,5");

        let counter = CountingInterpolator { calls: Cell::new(0) };
        let err = build_chart_with(&config(&o, &l, &h, 4), &counter).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
        assert_eq!(counter.calls.get(), 0);
    }

    #[test]
    fn missing_file_is_reported_before_parsing_others() {
        let dir = tempfile::tempdir().unwrap();
        // A parse error in the first file must not mask the missing third file.
        let o = write(&dir, "o.txt", "abc");
        let l = write(&dir, "l.txt", "1,2,3");

        let err = build_chart(&config(&o, &l, Path::new("/nonexistent/path"), 3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.message().starts_with("--highPassFilteredData"), "{err}");
    }

    #[test]
    fn too_few_samples_is_interpolation_error() {
        let dir = tempfile::tempdir().unwrap();
        let o = write(&dir, "o.txt", "1,2");
        let l = write(&dir, "l.txt", "1,2");
        let h = write(&dir, "h.txt", "1,2");

        let err = build_chart(&config(&o, &l, &h, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InterpolationError);
        assert!(err.message().starts_with("OriginalData"), "{err}");
    }

    #[test]
    fn every_series_reaches_the_interpolator() {
        let dir = tempfile::tempdir().unwrap();
        let o = write(&dir, "o.txt", "1,2,3");
        let l = write(&dir, "l.txt", "1,2,3");
        let h = write(&dir, "h.txt", "1,2,3");

        let counter = CountingInterpolator { calls: Cell::new(0) };
        build_chart_with(&config(&o, &l, &h, 3), &counter).unwrap();
        assert_eq!(counter.calls.get(), 3);
    }

    #[test]
    fn oversized_resolution_is_rejected_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let o = write(&dir, "o.txt", "1,2,3");
        let l = write(&dir, "l.txt", "1,2,3");
        let h = write(&dir, "h.txt", "1,2,3");

        for resolution in [0, MAX_RESOLUTION + 1, usize::MAX] {
            let mut cfg = config(&o, &l, &h, 3);
            cfg.resolution = resolution;
            let counter = CountingInterpolator { calls: Cell::new(0) };
            let err = build_chart_with(&cfg, &counter).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfig);
            assert_eq!(counter.calls.get(), 0);
        }
    }
}
