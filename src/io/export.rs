//! Export the smoothed chart data.
//!
//! - CSV: one row per axis point, one column per series (values at the knots)
//! - JSON: the whole `Chart`, including the display polylines

use std::fs::File;
use std::path::Path;

use crate::domain::{Chart, ExportFormat, ExportTarget};
use crate::error::{AppError, ErrorKind};

/// Write `chart` to `target`.
pub fn write_chart(target: &ExportTarget, chart: &Chart) -> Result<(), AppError> {
    match target.format {
        ExportFormat::Csv => write_chart_csv(&target.path, chart),
        ExportFormat::Json => write_chart_json(&target.path, chart),
    }?;
    log::info!("exported chart data to '{}'", target.path.display());
    Ok(())
}

/// Write `x` plus one column per series.
pub fn write_chart_csv(path: &Path, chart: &Chart) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(
            ErrorKind::Export,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    let mut header = vec!["x".to_string()];
    header.extend(chart.series.iter().map(|s| s.label.clone()));
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(ErrorKind::Export, format!("Failed to write export CSV header: {e}")))?;

    for (i, x) in chart.axis.iter().enumerate() {
        let mut row = vec![format!("{x}")];
        row.extend(
            chart
                .series
                .iter()
                .map(|s| s.smoothed.get(i).map(|v| format!("{v}")).unwrap_or_default()),
        );
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(ErrorKind::Export, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(ErrorKind::Export, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

pub fn write_chart_json(path: &Path, chart: &Chart) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Export,
            format!("Failed to create export JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, chart)
        .map_err(|e| AppError::new(ErrorKind::Export, format!("Failed to write export JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{ChartSeries, SeriesKind};

    fn small_chart() -> Chart {
        let axis = vec![0.0, 1.0, 2.0];
        let series = SeriesKind::ALL
            .iter()
            .enumerate()
            .map(|(k, kind)| {
                let values: Vec<f64> = axis.iter().map(|x| x + k as f64).collect();
                ChartSeries {
                    kind: *kind,
                    label: kind.label().to_string(),
                    source: PathBuf::from(format!("{k}.txt")),
                    samples: values.clone(),
                    smoothed: values.clone(),
                    display: axis.iter().copied().zip(values).collect(),
                }
            })
            .collect();
        Chart {
            x_label: "Samples".to_string(),
            y_label: "Data points".to_string(),
            axis,
            series,
        }
    }

    #[test]
    fn csv_has_one_row_per_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_chart_csv(&path, &small_chart()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "x,OriginalData,LowPassFilteredData,HighPassFilteredData");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "1,1,2,3");
    }

    #[test]
    fn json_round_trips_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_chart_json(&path, &small_chart()).unwrap();

        let back: Chart = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(back.series.len(), 3);
        assert_eq!(back.series[1].kind, SeriesKind::LowPass);
        assert_eq!(back.axis, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn unwritable_path_is_export_error() {
        let err = write_chart_csv(Path::new("/nonexistent/dir/out.csv"), &small_chart()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Export);
    }
}
