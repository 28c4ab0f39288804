//! Ratatui-based interactive chart viewer.
//!
//! Shows the three smoothed series in one chart. Keys `1`/`2`/`3` toggle a
//! series; `q` or `Esc` closes the viewer.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::domain::{Chart, SeriesKind};
use crate::error::{AppError, ErrorKind};
use crate::plot::{ChartBounds, series_rgb};

mod plotters_chart;

use plotters_chart::SeriesChart;

/// Open the viewer on `chart` and block until the user closes it.
pub fn run(chart: &Chart) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).map_err(|e| render_err("Failed to initialize terminal", e))?;

    let mut viewer = Viewer::new(chart);
    viewer.event_loop(&mut terminal)
}

fn render_err(what: &str, e: impl std::fmt::Display) -> AppError {
    AppError::new(ErrorKind::Render, format!("{what}: {e}"))
}

/// Restores the terminal (raw mode, alternate screen) on exit, including on error paths.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| render_err("Failed to enable raw mode", e))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(render_err("Failed to enter alternate screen", e));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct Viewer<'a> {
    chart: &'a Chart,
    visible: [bool; 3],
}

impl<'a> Viewer<'a> {
    fn new(chart: &'a Chart) -> Self {
        Self {
            chart,
            visible: [true; 3],
        }
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| render_err("Terminal draw error", e))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100)).map_err(|e| render_err("Event poll error", e))? {
                continue;
            }

            match event::read().map_err(|e| render_err("Event read error", e))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the viewer should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(c @ '1'..='3') => {
                let idx = c as usize - '1' as usize;
                self.visible[idx] = !self.visible[idx];
            }
            _ => {}
        }
        false
    }

    fn is_visible(&self, kind: SeriesKind) -> bool {
        self.visible[kind as usize]
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = Vec::new();
        for (i, s) in self.chart.series.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let (r, g, b) = series_rgb(s.kind);
            let mut style = Style::default().fg(Color::Rgb(r, g, b));
            if !self.is_visible(s.kind) {
                style = style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
            }
            spans.push(Span::styled(format!("[{}] {}", s.kind as usize + 1, s.label), style));
        }

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Filtered signals").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let shown: Vec<_> = self.chart.series.iter().filter(|s| self.is_visible(s.kind)).collect();
        let Some(bounds) = ChartBounds::of(shown.iter().copied()) else {
            let msg = Paragraph::new("All series hidden (press 1/2/3).").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let lines = shown
            .iter()
            .map(|s| {
                let (r, g, b) = series_rgb(s.kind);
                (s.display.as_slice(), RGBColor(r, g, b))
            })
            .collect();

        let (chart_rect, insets) = chart_layout(inner);
        let widget = SeriesChart {
            lines,
            x_bounds: bounds.x,
            y_bounds: bounds.y,
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            self.draw_axis_ticks(frame, inner, chart_rect, insets, &bounds);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "1/2/3 toggle series  q/Esc quit";
        let line = Line::from(Span::styled(help, Style::default().fg(Color::Gray)));
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_axis_ticks(
        &self,
        frame: &mut ratatui::Frame<'_>,
        inner: Rect,
        chart: Rect,
        insets: AxisInsets,
        bounds: &ChartBounds,
    ) {
        let ticks = 5usize;
        let style = Style::default().fg(Color::Gray);

        for i in 0..ticks {
            let u = i as f64 / (ticks as f64 - 1.0);
            let x_val = bounds.x[0] + u * (bounds.x[1] - bounds.x[0]);
            let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let label = format!("{x_val:.1}");
            let label_len = label.len() as u16;
            let start = x.saturating_sub(label_len / 2);
            let y = chart.y + chart.height;
            if y >= inner.y + inner.height - 1 {
                continue;
            }
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
        }

        for i in 0..ticks {
            let u = i as f64 / (ticks as f64 - 1.0);
            let y_val = bounds.y[0] + u * (bounds.y[1] - bounds.y[0]);
            let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
            let label = format!("{y_val:.2}");
            let label_len = label.len() as u16;
            let x = inner.x + insets.left.saturating_sub(1);
            let start = x.saturating_sub(label_len);
            if start < inner.x {
                continue;
            }
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
        }

        let x_rect = Rect {
            x: chart.x,
            y: chart.y + chart.height + 1,
            width: chart.width,
            height: 1,
        };
        if x_rect.y < inner.y + inner.height {
            let x_label = Paragraph::new(self.chart.x_label.as_str())
                .alignment(Alignment::Center)
                .style(style);
            frame.render_widget(x_label, x_rect);
        }

        let y_label = Paragraph::new(self.chart.y_label.as_str()).style(style.add_modifier(Modifier::BOLD));
        let y_rect = Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width.min(chart.width + insets.left),
            height: 1,
        };
        frame.render_widget(y_label, y_rect);
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 9,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ratatui::backend::TestBackend;

    use super::*;
    use crate::domain::ChartSeries;

    fn chart() -> Chart {
        let axis: Vec<f64> = (0..30).map(|i| i as f64 * 0.1).collect();
        let series = SeriesKind::ALL
            .iter()
            .map(|kind| {
                let ys: Vec<f64> = axis.iter().map(|x| x * (*kind as usize + 1) as f64).collect();
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

    fn screen(viewer: &Viewer<'_>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| viewer.draw(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn number_keys_toggle_series() {
        let chart = chart();
        let mut viewer = Viewer::new(&chart);
        assert!(!viewer.handle_key(KeyCode::Char('2')));
        assert_eq!(viewer.visible, [true, false, true]);
        assert!(!viewer.handle_key(KeyCode::Char('2')));
        assert!(!viewer.handle_key(KeyCode::Char('3')));
        assert_eq!(viewer.visible, [true, true, false]);
        assert!(!viewer.handle_key(KeyCode::Char('4')));
        assert_eq!(viewer.visible, [true, true, false]);
    }

    #[test]
    fn q_and_esc_close() {
        let chart = chart();
        let mut viewer = Viewer::new(&chart);
        assert!(viewer.handle_key(KeyCode::Char('q')));
        assert!(viewer.handle_key(KeyCode::Esc));
    }

    #[test]
    fn draws_legend_and_axis_labels() {
        let chart = chart();
        let viewer = Viewer::new(&chart);
        let text = screen(&viewer, 120, 30);
        assert!(text.contains("[1] OriginalData"));
        assert!(text.contains("[3] HighPassFilteredData"));
        assert!(text.contains("Samples"));
        assert!(text.contains("Data points"));
        assert!(text.contains("q/Esc quit"));
    }

    #[test]
    fn hiding_everything_shows_a_hint() {
        let chart = chart();
        let mut viewer = Viewer::new(&chart);
        for key in ['1', '2', '3'] {
            viewer.handle_key(KeyCode::Char(key));
        }
        let text = screen(&viewer, 120, 30);
        assert!(text.contains("All series hidden"));
    }
}
