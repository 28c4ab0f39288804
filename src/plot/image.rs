//! SVG/PNG chart files via Plotters.
//!
//! The same drawing routine runs on either backend. The SVG backend writes
//! text as `<text>` elements; the bitmap backend has to rasterise glyphs,
//! which Plotters can only do with the `fonts` cargo feature. Without it,
//! PNG charts are drawn without any text (no tick labels, axis titles or
//! legend box).

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::domain::{Chart, ImageFormat};
use crate::error::{AppError, ErrorKind};
use crate::plot::{ChartBounds, series_rgb};

/// Whether the bitmap backend can draw text in this build.
const PNG_TEXT: bool = cfg!(feature = "fonts");

/// Write `chart` to `path` as an image of `size` pixels.
pub fn write_image(chart: &Chart, path: &Path, format: ImageFormat, size: (u32, u32)) -> Result<(), AppError> {
    // Checked before a backend exists so an empty chart never leaves a file behind.
    let bounds = ChartBounds::of(&chart.series).ok_or_else(|| {
        AppError::new(ErrorKind::Render, "Chart has no data points to draw.")
    })?;

    let result = match format {
        ImageFormat::Svg => draw_chart(SVGBackend::new(path, size).into_drawing_area(), chart, &bounds, true),
        ImageFormat::Png => {
            if !PNG_TEXT {
                log::warn!("PNG output has no labels or legend; rebuild with `--features fonts` or use .svg");
            }
            draw_chart(BitMapBackend::new(path, size).into_drawing_area(), chart, &bounds, PNG_TEXT)
        }
    };

    if let Err(e) = result {
        // Both backends flush whatever was drawn when dropped.
        if path.is_file() {
            let _ = std::fs::remove_file(path);
        }
        return Err(AppError::new(
            ErrorKind::Render,
            format!("Failed to render chart to '{}': {e}", path.display()),
        ));
    }

    log::info!("wrote {format:?} chart to '{}'", path.display());
    Ok(())
}

/// Draw `chart` onto `root`. With `text == false` nothing goes through the
/// font layer: no label areas, no axis titles, no legend.
fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    chart: &Chart,
    bounds: &ChartBounds,
    text: bool,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if text {
        builder.x_label_area_size(40).y_label_area_size(60);
    }
    let mut ctx = builder.build_cartesian_2d(bounds.x[0]..bounds.x[1], bounds.y[0]..bounds.y[1])?;

    if text {
        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()?;
    } else {
        ctx.configure_mesh().draw()?;
    }

    for s in &chart.series {
        let (r, g, b) = series_rgb(s.kind);
        let color = RGBColor(r, g, b);
        let drawn = ctx.draw_series(LineSeries::new(s.display.iter().copied(), color.stroke_width(2)))?;
        if text {
            drawn
                .label(s.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }
    }

    if text {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{ChartSeries, SeriesKind};

    fn chart() -> Chart {
        let axis: Vec<f64> = (0..20).map(|i| i as f64 * 0.5).collect();
        let series = SeriesKind::ALL
            .iter()
            .enumerate()
            .map(|(k, kind)| {
                let ys: Vec<f64> = axis.iter().map(|x| (x + k as f64).sin()).collect();
                ChartSeries {
                    kind: *kind,
                    label: kind.label().to_string(),
                    source: PathBuf::from("x.txt"),
                    samples: ys.clone(),
                    smoothed: ys.clone(),
                    display: axis.iter().copied().zip(ys).collect(),
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
    fn svg_has_legend_and_axis_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        write_image(&chart(), &path, ImageFormat::Svg, (640, 480)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        for label in ["OriginalData", "LowPassFilteredData", "HighPassFilteredData", "Samples", "Data points"] {
            assert!(svg.contains(label), "missing {label}");
        }
    }

    #[test]
    fn png_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        write_image(&chart(), &path, ImageFormat::Png, (320, 240)).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn png_draws_series_without_text() {
        // Exercises the path used when the build has no font support.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.png");
        let c = chart();
        let bounds = ChartBounds::of(&c.series).unwrap();
        draw_chart(BitMapBackend::new(&path, (200, 150)).into_drawing_area(), &c, &bounds, false).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn failed_render_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        for (name, format) in [("chart.png", ImageFormat::Png), ("chart.svg", ImageFormat::Svg)] {
            let path = dir.path().join("missing").join(name);
            let err = write_image(&chart(), &path, format, (200, 150)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Render);
            assert!(!path.exists());
        }
    }

    #[test]
    fn empty_chart_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let empty = Chart {
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            axis: Vec::new(),
            series: Vec::new(),
        };
        let err = write_image(&empty, &path, ImageFormat::Svg, (100, 100)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Render);
        assert!(!path.exists());
    }
}
