//! 1D editor screen: spectrum strip above, reconstructed waveform below.

use super::raster::cell_to_pixel;
use super::{enter_editor, leave_editor, EditorTerminal, BACKGROUND, FOREGROUND, TRACE};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};
use std::error::Error;

/// Everything one frame of the 1D screen shows.
pub struct WaveView<'a> {
    /// Centered spectrum, one value per strip pixel
    pub spectrum: &'a [f64],
    /// Centered waveform, one value per strip pixel
    pub waveform: &'a [f64],
    pub sigma: f64,
    pub slider: u32,
    pub slider_max: u32,
    pub painting: bool,
    pub playing: bool,
}

/// Terminal UI for the 1D editor.
pub struct WaveScreen {
    terminal: EditorTerminal,
    strip_area: Rect,
}

impl WaveScreen {
    /// Takes over the terminal and enables mouse reporting.
    ///
    /// # Errors
    /// - If raw mode, the alternate screen or mouse capture cannot be enabled
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Ok(WaveScreen {
            terminal: enter_editor()?,
            strip_area: Rect::default(),
        })
    }

    /// Draws one frame.
    ///
    /// # Errors
    /// - If terminal rendering fails
    pub fn render(&mut self, view: &WaveView) -> Result<(), Box<dyn Error>> {
        let spectrum_points = points(view.spectrum);
        let waveform_points = points(view.waveform);
        let mut strip_area = self.strip_area;

        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

            let [top, bottom, footer] = Layout::vertical([
                Constraint::Percentage(50),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(area);

            let spectrum_block = pane(" spectrum ");
            strip_area = spectrum_block.inner(top);
            frame.render_widget(
                line_chart(&spectrum_points, view.spectrum.len(), view.spectrum, Color::Rgb(255, 140, 0))
                    .block(spectrum_block),
                top,
            );
            frame.render_widget(
                line_chart(&waveform_points, view.waveform.len(), view.waveform, TRACE)
                    .block(pane(" waveform ")),
                bottom,
            );

            frame.render_widget(status_line(view), footer);
        })?;

        self.strip_area = strip_area;
        Ok(())
    }

    /// Strip pixel under a terminal cell, if the cell is on the spectrum strip.
    pub fn strip_pixel(&self, column: u16, row: u16, image_n: usize) -> Option<f64> {
        cell_to_pixel(self.strip_area, column, row, image_n, 1).map(|(px, _)| px)
    }

    /// Restores the terminal.
    ///
    /// # Errors
    /// - If the terminal mode cannot be restored
    pub fn cleanup(&mut self) -> Result<(), Box<dyn Error>> {
        leave_editor(&mut self.terminal)
    }
}

impl Drop for WaveScreen {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn pane(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(FOREGROUND).bg(BACKGROUND))
}

fn points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

fn line_chart<'a>(data: &'a [(f64, f64)], width: usize, values: &[f64], color: Color) -> Chart<'a> {
    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data);

    Chart::new(vec![dataset])
        .style(Style::default().bg(BACKGROUND))
        .x_axis(Axis::default().bounds([0.0, width.saturating_sub(1).max(1) as f64]))
        .y_axis(Axis::default().bounds(value_bounds(values)))
}

/// Y range covering `values` and zero; `[-1, 1]` when everything is zero.
fn value_bounds(values: &[f64]) -> [f64; 2] {
    let (lo, hi) = values
        .iter()
        .fold((0.0f64, 0.0f64), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if hi > lo {
        let margin = (hi - lo) * 0.05;
        [lo - margin, hi + margin]
    } else {
        [-1.0, 1.0]
    }
}

fn status_line(view: &WaveView) -> Paragraph<'static> {
    let indicator = if view.painting {
        Span::styled("● ", Style::default().fg(Color::Red))
    } else if view.playing {
        Span::styled("♪ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("○ ", Style::default().fg(FOREGROUND))
    };
    let line = Line::from(vec![
        indicator,
        Span::raw(format!(
            "σ {:.2} ({}/{})",
            view.sigma, view.slider, view.slider_max
        )),
        Span::styled(
            "   click+hold paint · +/- sigma · p play · c clear · q quit",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    Paragraph::new(line).style(Style::default().fg(FOREGROUND).bg(BACKGROUND))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_bounds_include_zero() {
        let [lo, hi] = value_bounds(&[1.0, 3.0]);
        assert!(lo < 0.0 && lo > -0.2);
        assert!(hi > 3.0 && hi < 3.2);

        let [lo, hi] = value_bounds(&[-2.0, 2.0]);
        assert!(lo < -2.0 && hi > 2.0);
    }

    #[test]
    fn test_value_bounds_silent() {
        assert_eq!(value_bounds(&[0.0; 8]), [-1.0, 1.0]);
        assert_eq!(value_bounds(&[]), [-1.0, 1.0]);
    }

    #[test]
    fn test_points_index_values() {
        assert_eq!(points(&[0.5, -1.0]), vec![(0.0, 0.5), (1.0, -1.0)]);
    }
}
