//! Compose line
//!
//! Shows what the user is typing. The border title names the room the
//! line will be sent to; an empty buffer shows a dimmed hint instead.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::InputState;

const PROMPT: &str = "> ";
const HINT_CONNECTED: &str = "Say something, or /help";
const HINT_IDLE: &str = "/create or /join CODE";

/// Render the compose line for the room `code` (if connected).
pub fn render(frame: &mut Frame, input: &InputState, code: Option<&str>, area: Rect) {
    let title = match code {
        Some(code) => format!(" Message {code} "),
        None => " Not in a room ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    // Columns between the prompt and the right border.
    let width = usize::from(area.width.saturating_sub(2)).saturating_sub(PROMPT.len());
    let skip = input.cursor().saturating_sub(width.saturating_sub(1));

    let body = if input.buffer().is_empty() {
        let hint = if code.is_some() { HINT_CONNECTED } else { HINT_IDLE };
        Span::styled(hint, Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
    } else {
        Span::raw(input.buffer().chars().skip(skip).collect::<String>())
    };
    let line = Line::from(vec![Span::styled(PROMPT, Style::default().fg(Color::Cyan)), body]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    let column = (PROMPT.len() + input.cursor() - skip) as u16;
    frame.set_cursor_position((area.x + 1 + column, area.y + 1));
}
