//! Stage
//!
//! Camera tiles for everyone with a camera (always including the local
//! user), or the screen share panel while sharing.

use castor_core::RoomView;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const MUTED_MARKER: &str = "muted";
const IDLE_HINT: &str = "/create or /join CODE to start";

/// Render the stage.
pub fn render(frame: &mut Frame, view: &RoomView, area: Rect) {
    if !view.is_connected {
        let block = Block::default().borders(Borders::ALL).title(" Stage ");
        let hint = Paragraph::new(Span::styled(IDLE_HINT, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    if let Some(share) = &view.screen_share {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Screen share ")
            .border_style(Style::default().fg(Color::Magenta));
        let text = Line::from(vec![
            Span::styled(share.owner.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" is sharing their screen"),
        ]);
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center).block(block), area);
        return;
    }

    let tiles = &view.camera_tiles;
    if tiles.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> =
        tiles.iter().map(|_| Constraint::Ratio(1, tiles.len() as u32)).collect();
    let areas = Layout::default().direction(Direction::Horizontal).constraints(constraints).split(area);

    for (tile, tile_area) in tiles.iter().zip(areas.iter()) {
        let border = if tile.is_you { Color::Cyan } else { Color::Gray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        let mut lines = vec![Line::from(tile.label.clone())];
        if tile.is_muted {
            lines.push(Line::from(Span::styled(MUTED_MARKER, Style::default().fg(Color::Red))));
        }
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(block);
        frame.render_widget(paragraph, *tile_area);
    }
}

#[cfg(test)]
mod tests {
    use castor_core::{CameraTile, ParticipantId, ScreenShareView};

    use super::*;
    use crate::ui::test_support::{connected_view, contains, draw_rows};

    fn tile(name: &str, label: &str, is_you: bool, is_muted: bool) -> CameraTile {
        CameraTile {
            participant_id: ParticipantId::new(name),
            name: name.to_string(),
            label: label.to_string(),
            is_you,
            is_muted,
        }
    }

    #[test]
    fn tiles_show_labels_and_mute() {
        let mut view = connected_view();
        view.camera_tiles =
            vec![tile("Ada", "Ada (You)", true, false), tile("Bob", "Bob", false, true)];
        let rows = draw_rows(60, 5, |frame| {
            let area = frame.area();
            render(frame, &view, area)
        });

        assert!(contains(&rows, "Ada (You)"));
        assert!(contains(&rows, "Bob"));
        assert!(contains(&rows, MUTED_MARKER));
    }

    #[test]
    fn screen_share_replaces_tiles() {
        let mut view = connected_view();
        view.camera_tiles = vec![tile("Ada", "Ada (You)", true, false)];
        view.screen_share = Some(ScreenShareView { owner: "Ada (You)".to_string() });
        let rows = draw_rows(60, 5, |frame| {
            let area = frame.area();
            render(frame, &view, area)
        });

        assert!(contains(&rows, "Ada (You) is sharing their screen"));
    }
}
