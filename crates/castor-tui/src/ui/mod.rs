//! UI rendering
//!
//! Pure rendering functions that turn a [`RoomView`] into ratatui widgets.
//! Nothing here touches the engine; the runtime passes in a fresh view.

mod cameras;
mod chat;
mod input;
mod notices;
mod participants;
mod status;

use castor_core::RoomView;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::InputState;

/// Render the entire UI.
pub fn render(frame: &mut Frame, view: &RoomView, input: &InputState, status: Option<&str>) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 6;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, view, *main_area);
    input::render(frame, input, view.code.as_deref(), *input_area);
    status::render(frame, view, status, *status_area);
}

/// Participants sidebar, stage and chat in the middle, activity on the right.
fn render_main_area(frame: &mut Frame, view: &RoomView, area: Rect) {
    const PARTICIPANTS_WIDTH: u16 = 30;
    const CENTER_MIN_WIDTH: u16 = 30;
    const NOTICES_WIDTH: u16 = 36;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(PARTICIPANTS_WIDTH),
            Constraint::Min(CENTER_MIN_WIDTH),
            Constraint::Length(NOTICES_WIDTH),
        ])
        .split(area);

    let [participants_area, center_area, notices_area] = chunks.as_ref() else {
        return;
    };

    participants::render(frame, view, *participants_area);
    render_center(frame, view, *center_area);
    notices::render(frame, view, *notices_area);
}

fn render_center(frame: &mut Frame, view: &RoomView, area: Rect) {
    const STAGE_HEIGHT: u16 = 5;
    const CHAT_MIN_HEIGHT: u16 = 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(STAGE_HEIGHT), Constraint::Min(CHAT_MIN_HEIGHT)])
        .split(area);

    let [stage_area, chat_area] = chunks.as_ref() else {
        return;
    };

    cameras::render(frame, view, *stage_area);
    chat::render(frame, view, *chat_area);
}


#[cfg(test)]
mod tests {
    use super::{test_support::*, *};

    #[test]
    fn disconnected_screen_shows_hint() {
        let view = RoomView::default();
        let input = InputState::new();
        let rows = draw_rows(120, 24, |frame| render(frame, &view, &input, None));

        assert!(contains(&rows, "Not connected"));
        assert!(contains(&rows, "/create"));
    }

    #[test]
    fn connected_screen_has_every_panel() {
        let view = connected_view();
        let input = InputState::new();
        let rows = draw_rows(120, 24, |frame| render(frame, &view, &input, Some("hi")));

        assert!(contains(&rows, " Participants (2) "));
        assert!(contains(&rows, " Chat "));
        assert!(contains(&rows, " Activity "));
        assert!(contains(&rows, "Room ABC123"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let view = connected_view();
        let input = InputState::new();
        draw_rows(10, 4, |frame| render(frame, &view, &input, None));
    }
}
