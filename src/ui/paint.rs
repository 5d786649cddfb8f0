//! 2D editor screen: the magnified spectrum crop next to the reconstructed image.

use super::raster::{cell_to_pixel, fit_square, GrayRaster};
use super::{enter_editor, leave_editor, EditorTerminal, BACKGROUND, FOREGROUND};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::error::Error;

/// Everything one frame of the 2D screen shows.
pub struct PaintView<'a> {
    /// Crop magnitude, `image_n x image_n` gray levels
    pub crop: &'a [u8],
    /// Reconstructed image, `image_n x image_n` gray levels
    pub image: &'a [u8],
    pub image_n: usize,
    pub sigma: f64,
    pub slider: u32,
    pub slider_max: u32,
    pub painting: bool,
}

/// Terminal UI for the 2D editor.
pub struct PaintScreen {
    terminal: EditorTerminal,
    /// Where the crop was drawn last frame; pointer presses are mapped through it
    edit_area: Rect,
}

impl PaintScreen {
    /// Takes over the terminal and enables mouse reporting.
    ///
    /// # Errors
    /// - If raw mode, the alternate screen or mouse capture cannot be enabled
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Ok(PaintScreen {
            terminal: enter_editor()?,
            edit_area: Rect::default(),
        })
    }

    /// Draws one frame.
    ///
    /// # Errors
    /// - If terminal rendering fails
    pub fn render(&mut self, view: &PaintView) -> Result<(), Box<dyn Error>> {
        let mut edit_area = self.edit_area;

        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

            let [content, footer] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(content);

            let pane_style = Style::default().fg(FOREGROUND).bg(BACKGROUND);
            let spectrum_block = Block::default()
                .borders(Borders::ALL)
                .title(" spectrum ")
                .style(pane_style);
            let image_block = Block::default()
                .borders(Borders::ALL)
                .title(" image ")
                .style(pane_style);

            edit_area = fit_square(spectrum_block.inner(left));
            let image_area = fit_square(image_block.inner(right));
            frame.render_widget(spectrum_block, left);
            frame.render_widget(image_block, right);

            frame.render_widget(
                GrayRaster::new(view.crop, view.image_n, view.image_n).center_cross(true),
                edit_area,
            );
            frame.render_widget(
                GrayRaster::new(view.image, view.image_n, view.image_n),
                image_area,
            );

            frame.render_widget(status_line(view), footer);
        })?;

        self.edit_area = edit_area;
        Ok(())
    }

    /// View pixel under a terminal cell, if the cell is on the spectrum crop.
    pub fn edit_pixel(&self, column: u16, row: u16, image_n: usize) -> Option<(f64, f64)> {
        cell_to_pixel(self.edit_area, column, row, image_n, image_n)
    }

    /// Restores the terminal.
    ///
    /// # Errors
    /// - If the terminal mode cannot be restored
    pub fn cleanup(&mut self) -> Result<(), Box<dyn Error>> {
        leave_editor(&mut self.terminal)
    }
}

impl Drop for PaintScreen {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn status_line(view: &PaintView) -> Paragraph<'static> {
    let indicator = if view.painting {
        Span::styled("● ", Style::default().fg(Color::Red))
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
            "   click+hold paint · +/- sigma · c clear · q quit",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    Paragraph::new(line).style(Style::default().fg(FOREGROUND).bg(BACKGROUND))
}
