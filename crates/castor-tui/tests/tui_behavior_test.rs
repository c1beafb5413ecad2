//! End-to-end tests for terminal client behavior.
//!
//! # Test Strategy
//!
//! Each test types what a user would type, key by key, into [`InputState`]
//! against an [`App`] backed by the simulation harness, lets virtual time
//! pass, and checks the resulting [`castor_core::RoomView`]: the same data
//! the terminal renders.

use std::time::Duration;

use castor_core::{EngineConfig, RoomEngine};
use castor_harness::{SimEnv, SimScheduler};
use castor_tui::{App, AppAction, InputState, KeyInput};

struct Session {
    app: App<SimEnv, SimScheduler>,
    input: InputState,
    env: SimEnv,
}

impl Session {
    fn new(seed: u64) -> Self {
        let env = SimEnv::with_seed(seed);
        let engine =
            RoomEngine::new(env.clone(), SimScheduler::new(env.clone()), EngineConfig::default());
        Self { app: App::new(engine, "auto"), input: InputState::new(), env }
    }

    /// Type a line and press Enter.
    fn submit(&mut self, line: &str) -> Vec<AppAction> {
        for c in line.chars() {
            self.input.handle_key(KeyInput::Char(c), &mut self.app);
        }
        self.input.handle_key(KeyInput::Enter, &mut self.app)
    }

    /// Deliver every timer due within `by`, then move the clock there.
    fn wait(&mut self, by: Duration) {
        let target = self.env.elapsed() + by;
        while let Some(timer) = self.app.engine_mut().scheduler_mut().pop_due(target) {
            self.app.handle_timer(timer);
        }
        self.env.advance_to(target);
    }
}

#[test]
fn create_chat_and_leave() {
    let mut session = Session::new(1);

    session.submit("/name Ada");
    session.submit("/create");
    let view = session.app.view();
    assert!(view.is_connected);
    assert!(view.demo_mode);
    assert_eq!(view.local_name, "Ada");

    session.wait(Duration::from_secs(8));
    assert!(session.app.view().participant_count >= 3);

    session.submit("hello room");
    session.wait(Duration::from_secs(3));
    let view = session.app.view();
    let own: Vec<_> = view.chat.iter().filter(|row| row.is_own).collect();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].author, "Ada");
    assert!(view.chat.iter().any(|row| !row.is_own));

    session.submit("/leave");
    let view = session.app.view();
    assert!(!view.is_connected);
    assert!(view.chat.is_empty());
    assert!(view.participants.is_empty());
    assert_eq!(session.app.status(), Some("Left the room"));
}

#[test]
fn join_with_bad_code_stays_disconnected() {
    let mut session = Session::new(2);
    session.submit("/join ab12");

    assert!(!session.app.view().is_connected);
    assert_eq!(session.app.status(), Some("Room code must be 6 characters"));
}

#[test]
fn moderator_kicks_demo_participant() {
    let mut session = Session::new(3);
    session.submit("/join room42");
    session.wait(Duration::from_secs(8));

    let before = session.app.view();
    let target = before.participants[1].name.clone();
    assert!(before.participants[1].can_moderate);

    session.submit("/kick 2");
    let after = session.app.view();
    assert_eq!(after.participant_count, before.participant_count - 1);
    assert!(after.notices.iter().any(|n| n.text == format!("{target} has been removed from the room")));
}

#[test]
fn screen_share_and_hand() {
    let mut session = Session::new(4);
    session.submit("/create");

    session.submit("/share");
    assert!(session.app.view().screen_share.is_some());
    session.submit("/hand");
    assert!(session.app.view().participants[0].hand_raised);

    session.submit("/share");
    assert!(session.app.view().screen_share.is_none());
}

#[test]
fn unknown_command_sets_status() {
    let mut session = Session::new(5);
    session.submit("/dance");
    assert_eq!(session.app.status(), Some("Unknown command: /dance"));
}

#[test]
fn quit_via_command_and_escape() {
    let mut session = Session::new(6);
    assert_eq!(session.submit("/quit"), [AppAction::Quit]);
    assert_eq!(session.input.handle_key(KeyInput::Esc, &mut session.app), [AppAction::Quit]);
}
