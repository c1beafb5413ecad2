//! Terminal driver.
//!
//! Owns the raw-mode terminal: crossterm for keyboard events, ratatui for
//! drawing. Restores the terminal on drop, including on error paths.

use std::io::{self, Stdout, stdout};

use castor_core::RoomView;
use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{InputState, KeyInput, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The terminal event stream ended.
    #[error("terminal event stream closed")]
    EventStreamClosed,
}

/// What the terminal reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key relevant to the input line.
    Key(KeyInput),
    /// The window was resized.
    Resize,
    /// Nothing the UI cares about.
    Ignored,
}

/// Raw-mode terminal with an event stream.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, event_stream: EventStream::new() })
    }

    /// Wait for the next terminal event.
    pub async fn next_event(&mut self) -> Result<TerminalEvent, TerminalError> {
        match self.event_stream.next().await {
            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                Ok(convert_key(key).map_or(TerminalEvent::Ignored, TerminalEvent::Key))
            },
            Some(Ok(Event::Resize(..))) => Ok(TerminalEvent::Resize),
            Some(Ok(_)) => Ok(TerminalEvent::Ignored),
            Some(Err(e)) => Err(TerminalError::Io(e)),
            None => Err(TerminalError::EventStreamClosed),
        }
    }

    /// Draw the whole UI.
    pub fn render(
        &mut self,
        view: &RoomView,
        input: &InputState,
        status: Option<&str>,
    ) -> Result<(), TerminalError> {
        self.terminal.draw(|frame| ui::render(frame, view, input, status))?;
        Ok(())
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Convert a crossterm key event. Ctrl+C maps to Esc (quit).
fn convert_key(key: KeyEvent) -> Option<KeyInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyInput::Esc);
    }
    match key.code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Esc => Some(KeyInput::Esc),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        _ => None,
    }
}
