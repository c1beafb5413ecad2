//! Participants sidebar
//!
//! Numbered roster; the number is what `/mutep` and `/kick` take.

use castor_core::{ParticipantStatus, RoomView};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

const HAND_MARKER: &str = " ✋";
const YOU_SUFFIX: &str = " (You)";

fn status_style(status: ParticipantStatus) -> Style {
    match status {
        ParticipantStatus::Muted => Style::default().fg(Color::Red),
        ParticipantStatus::Speaking => {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        },
        ParticipantStatus::Connected => Style::default().fg(Color::DarkGray),
    }
}

/// Render the participants sidebar.
pub fn render(frame: &mut Frame, view: &RoomView, area: Rect) {
    let items: Vec<ListItem> = view
        .participants
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let name_style = if row.is_you {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let suffix = if row.is_you { YOU_SUFFIX } else { "" };
            let hand = if row.hand_raised { HAND_MARKER } else { "" };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", index + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("[{}] ", row.initial), Style::default().fg(Color::Yellow)),
                Span::styled(format!("{}{suffix}", row.name), name_style),
                Span::raw(" "),
                Span::styled(row.status.label(), status_style(row.status)),
                Span::raw(hand),
            ]))
        })
        .collect();

    let title = format!(" Participants ({}) ", view.participant_count);
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(List::new(items).block(block), area);
}
