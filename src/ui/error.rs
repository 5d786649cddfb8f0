//! Full-screen error display.
//!
//! Used when an editor cannot start (bad configuration, no audio device), so
//! the message is visible even though the terminal was about to be taken over.

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph, Wrap},
};
use std::io::{self, Stdout};
use std::time::Duration;

const ERROR_BG: Color = Color::Rgb(255, 0, 0);
const ERROR_FG: Color = Color::Rgb(255, 255, 255);

/// Red full-screen message, dismissed by any key.
pub struct ErrorScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl ErrorScreen {
    /// Enters the alternate screen.
    ///
    /// # Errors
    /// - If raw mode or the alternate screen cannot be entered
    pub fn new() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(ErrorScreen { terminal })
    }

    /// Shows `error_message` centered on red until a key is pressed.
    ///
    /// # Errors
    /// - If terminal rendering fails
    pub fn show_error(&mut self, error_message: &str) -> anyhow::Result<()> {
        loop {
            self.terminal.draw(|frame| {
                let area = frame.area();
                frame.render_widget(
                    Block::default().style(Style::default().bg(ERROR_BG)),
                    area,
                );

                let text_area = Rect {
                    x: area.x + area.width / 10,
                    y: area.y + area.height / 3,
                    width: area.width * 8 / 10,
                    height: area.height - area.height / 3,
                };
                let paragraph = Paragraph::new(Text::styled(
                    error_message,
                    Style::default().fg(ERROR_FG).bg(ERROR_BG),
                ))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });

                frame.render_widget(paragraph, text_area);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(_) = event::read()? {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Leaves the alternate screen and restores the cursor.
    ///
    /// # Errors
    /// - If the terminal mode cannot be restored
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for ErrorScreen {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Logs `err`, shows it on an [`ErrorScreen`] under `title` and returns the
/// error for the caller to propagate.
pub fn report(title: &str, hint: &str, err: anyhow::Error) -> anyhow::Error {
    tracing::error!("{title}: {err:#}");
    let message = format!("{title}:\n\n{err:#}\n\n{hint}");
    let shown = ErrorScreen::new().and_then(|mut screen| {
        screen.show_error(&message)?;
        screen.cleanup()
    });
    match shown {
        Ok(()) => anyhow::anyhow!("{title}: {err:#}"),
        Err(screen_err) => {
            tracing::error!("Could not show error screen: {screen_err:#}");
            err
        }
    }
}
