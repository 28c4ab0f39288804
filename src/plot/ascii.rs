//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual comparison of the three signals in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each series is drawn as a connected line with its own glyph. Series are
//! drawn in order and never overwrite cells already taken, so the original
//! signal stays on top.

use crate::domain::{Chart, SeriesKind};
use crate::plot::ChartBounds;

/// Glyph used for a series.
pub fn glyph(kind: SeriesKind) -> char {
    match kind {
        SeriesKind::Original => '*',
        SeriesKind::LowPass => '+',
        SeriesKind::HighPass => '.',
    }
}

/// Render `chart` into a `width` x `height` character grid plus a header and legend.
pub fn render_ascii_chart(chart: &Chart, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some(bounds) = ChartBounds::of(&chart.series) else {
        return "No data to plot.\n".to_string();
    };

    let mut grid = vec![vec![' '; width]; height];
    for s in &chart.series {
        draw_curve(&mut grid, &s.display, &bounds, glyph(s.kind));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {}=[{:.3}, {:.3}] | {}=[{:.3}, {:.3}]\n",
        chart.x_label, bounds.x[0], bounds.x[1], chart.y_label, bounds.y[0], bounds.y[1]
    ));

    let legend: Vec<String> = chart
        .series
        .iter()
        .map(|s| format!("{} {}", glyph(s.kind), s.label))
        .collect();
    out.push_str(&format!("Legend: {}\n", legend.join("  ")));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn map_x(x: f64, bounds: &ChartBounds, width: usize) -> usize {
    let width = width.max(2);
    let [x0, x1] = bounds.x;
    let u = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, bounds: &ChartBounds, height: usize) -> usize {
    let height = height.max(2);
    let [y0, y1] = bounds.y;
    let u = ((y - y0) / (y1 - y0)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], bounds: &ChartBounds, ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, bounds, width);
        let row = map_y(y, bounds, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => {
                if grid[row][col] == ' ' {
                    grid[row][col] = ch;
                }
            }
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
