//! Input state and key handling for the TUI.
//!
//! This module owns all text input state (buffer, cursor) and handles
//! character-level key events. Command parsing happens here on Enter.

use castor_core::{Environment, Scheduler};

use crate::{
    app::{App, AppAction},
    commands,
};

/// Key input events from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Character input.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Escape key.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow (previous input).
    Up,
    /// Down arrow (next input).
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Input state for the TUI.
///
/// Manages the text input buffer, cursor position (in characters) and a
/// history of submitted lines.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
    history: Vec<String>,
    history_pos: Option<usize>,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key input event.
    ///
    /// Editing keys only return [`AppAction::Render`]; Enter runs the
    /// parsed command against `app`.
    pub fn handle_key<E: Environment, S: Scheduler>(
        &mut self,
        key: KeyInput,
        app: &mut App<E, S>,
    ) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.char_len(),
            KeyInput::Up => self.recall(-1),
            KeyInput::Down => self.recall(1),
            KeyInput::Enter => return self.handle_enter(app),
            KeyInput::Esc => return vec![AppAction::Quit],
        }
        vec![AppAction::Render]
    }

    /// Handle Enter key - parse command and run it.
    fn handle_enter<E: Environment, S: Scheduler>(
        &mut self,
        app: &mut App<E, S>,
    ) -> Vec<AppAction> {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        self.history_pos = None;

        if text.trim().is_empty() {
            return vec![AppAction::Render];
        }

        self.history.push(text.clone());
        app.execute(commands::parse(&text))
    }

    fn recall(&mut self, step: isize) {
        if self.history.is_empty() {
            return;
        }
        let last = self.history.len() - 1;
        let next = match (self.history_pos, step < 0) {
            (None, true) => Some(last),
            (None, false) => None,
            (Some(0), true) => Some(0),
            (Some(pos), true) => Some(pos - 1),
            (Some(pos), false) if pos >= last => None,
            (Some(pos), false) => Some(pos + 1),
        };

        self.history_pos = next;
        self.buffer = next.and_then(|pos| self.history.get(pos).cloned()).unwrap_or_default();
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(at, _)| at)
    }
}
