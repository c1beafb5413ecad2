//! Chat area
//!
//! Chat history, newest at the bottom.

use castor_core::RoomView;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;

/// Render the chat area.
pub fn render(frame: &mut Frame, view: &RoomView, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Chat ");

    let items: Vec<ListItem> = if view.is_connected && view.chat.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No messages yet",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        view.chat
            .iter()
            .map(|row| {
                let author_color = if row.is_own { Color::Cyan } else { Color::Green };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", row.time), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("<{}>", row.author),
                        Style::default().fg(author_color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::raw(row.content.clone()),
                ]))
            })
            .collect()
    };

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
