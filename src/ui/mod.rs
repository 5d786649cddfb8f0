//! Terminal screens.
//!
//! Each editor screen owns the terminal for as long as it lives and turns
//! crossterm events into [`ScreenCommand`]s for the command loop.

pub mod error;
pub mod paint;
pub mod raster;
pub mod wave;

pub use paint::{PaintScreen, PaintView};
pub use wave::{WaveScreen, WaveView};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, style::Color, Terminal};
use std::error::Error;
use std::io::{stdout, Stdout};
use std::time::Duration;

pub(crate) const BACKGROUND: Color = Color::Rgb(0, 0, 0);
pub(crate) const FOREGROUND: Color = Color::Rgb(185, 207, 212);
pub(crate) const TRACE: Color = Color::Rgb(206, 224, 220);

pub(crate) type EditorTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode, alternate screen and mouse reporting.
pub(crate) fn enter_editor() -> Result<EditorTerminal, Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Undoes [`enter_editor`].
pub(crate) fn leave_editor(terminal: &mut EditorTerminal) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// User input on an editor screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Nothing to do (timeout or ignored event)
    Continue,
    /// Left button went down on a terminal cell
    Press { column: u16, row: u16 },
    /// Left button went up, wherever the pointer is
    Release,
    /// Widen the bump (`+`)
    SigmaUp,
    /// Narrow the bump (`-`)
    SigmaDown,
    /// Zero the spectrum (`c`)
    Clear,
    /// Play the current waveform (`p`)
    Play,
    /// Terminal was resized
    Redraw,
    /// Leave the screen (`q`, Escape, Ctrl+C)
    Quit,
}

/// Waits up to `timeout` for one event.
///
/// # Errors
/// - If event polling fails
pub fn read_command(timeout: Duration) -> Result<ScreenCommand, Box<dyn Error>> {
    if event::poll(timeout)? {
        return Ok(command_for(&event::read()?));
    }
    Ok(ScreenCommand::Continue)
}

/// Maps one terminal event to a command.
///
/// Drags do not move the anchor: a held button keeps painting where it went down.
pub fn command_for(event: &Event) -> ScreenCommand {
    match event {
        Event::Key(key) => command_for_key(key),
        Event::Mouse(mouse) => command_for_mouse(mouse),
        Event::Resize(..) => ScreenCommand::Redraw,
        _ => ScreenCommand::Continue,
    }
}

fn command_for_key(key: &KeyEvent) -> ScreenCommand {
    if key.kind == KeyEventKind::Release {
        return ScreenCommand::Continue;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            tracing::debug!("Escape or 'q' pressed: leaving editor");
            ScreenCommand::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            tracing::debug!("Ctrl+C pressed: leaving editor");
            ScreenCommand::Quit
        }
        KeyCode::Char('c') => ScreenCommand::Clear,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => ScreenCommand::SigmaUp,
        KeyCode::Char('-') | KeyCode::Down => ScreenCommand::SigmaDown,
        KeyCode::Char('p') | KeyCode::Char(' ') => ScreenCommand::Play,
        _ => ScreenCommand::Continue,
    }
}

fn command_for_mouse(mouse: &MouseEvent) -> ScreenCommand {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => ScreenCommand::Press {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::Up(MouseButton::Left) => ScreenCommand::Release,
        _ => ScreenCommand::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_keys() {
        assert_eq!(command_for(&key(KeyCode::Char('q'), KeyModifiers::NONE)), ScreenCommand::Quit);
        assert_eq!(command_for(&key(KeyCode::Esc, KeyModifiers::NONE)), ScreenCommand::Quit);
        assert_eq!(command_for(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), ScreenCommand::Quit);
        assert_eq!(command_for(&key(KeyCode::Char('c'), KeyModifiers::NONE)), ScreenCommand::Clear);
        assert_eq!(command_for(&key(KeyCode::Char('+'), KeyModifiers::SHIFT)), ScreenCommand::SigmaUp);
        assert_eq!(command_for(&key(KeyCode::Char('-'), KeyModifiers::NONE)), ScreenCommand::SigmaDown);
        assert_eq!(command_for(&key(KeyCode::Char('p'), KeyModifiers::NONE)), ScreenCommand::Play);
        assert_eq!(command_for(&key(KeyCode::Char('x'), KeyModifiers::NONE)), ScreenCommand::Continue);
    }

    #[test]
    fn test_mouse() {
        assert_eq!(
            command_for(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 7)),
            ScreenCommand::Press { column: 4, row: 7 }
        );
        assert_eq!(
            command_for(&mouse(MouseEventKind::Up(MouseButton::Left), 0, 0)),
            ScreenCommand::Release
        );
        assert_eq!(
            command_for(&mouse(MouseEventKind::Drag(MouseButton::Left), 9, 9)),
            ScreenCommand::Continue
        );
        assert_eq!(
            command_for(&mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)),
            ScreenCommand::Continue
        );
    }

    #[test]
    fn test_resize_redraws() {
        assert_eq!(command_for(&Event::Resize(80, 24)), ScreenCommand::Redraw);
    }
}
