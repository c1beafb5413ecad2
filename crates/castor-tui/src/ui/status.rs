//! Status bar
//!
//! Connection state, room code, participant count and the last status
//! message.

use castor_core::RoomView;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, view: &RoomView, status: Option<&str>, area: Rect) {
    let connection = match &view.code {
        Some(code) if view.is_connected => Span::styled(
            format!("Room {code}"),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        _ => Span::styled("Not connected", Style::default().fg(Color::Red)),
    };

    let mut spans = vec![Span::raw(" "), connection];
    if view.demo_mode {
        spans.push(Span::styled(" demo", Style::default().fg(Color::Magenta)));
    }
    if view.is_connected {
        spans.push(Span::raw(format!(" | {} in room", view.participant_count)));
    }
    spans.push(Span::raw(format!(" | {}", view.local_name)));
    if let Some(message) = status {
        spans.push(Span::styled(format!(" | {message}"), Style::default().fg(Color::Yellow)));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{connected_view, draw_rows};

    #[test]
    fn connected_status_line() {
        let view = connected_view();
        let rows = draw_rows(80, 1, |frame| {
            let area = frame.area();
            render(frame, &view, Some("Camera on"), area)
        });
        insta::assert_snapshot!(rows[0].trim(), @"Room ABC123 demo | 2 in room | Ada | Camera on");
    }

    #[test]
    fn disconnected_status_line() {
        let view = castor_core::RoomView { local_name: "You".to_string(), ..Default::default() };
        let rows = draw_rows(80, 1, |frame| {
            let area = frame.area();
            render(frame, &view, None, area)
        });
        insta::assert_snapshot!(rows[0].trim(), @"Not connected | You");
    }
}
