//! Activity panel
//!
//! System notices (joins, moderation, sharing), newest at the bottom.

use castor_core::RoomView;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const BORDER_SIZE: u16 = 2;

/// Render the activity panel.
pub fn render(frame: &mut Frame, view: &RoomView, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Activity ");

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = view.notices.len().saturating_sub(visible_height);
    let lines: Vec<Line> = view
        .notices
        .iter()
        .skip(skip)
        .map(|notice| {
            Line::from(vec![
                Span::styled(format!("{} ", notice.time), Style::default().fg(Color::DarkGray)),
                Span::styled(notice.text.clone(), Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}
