//! Room simulation engine.
//!
//! [`RoomEngine`] owns the room state, chat log and presence simulator, and
//! is the single entry point for UI commands and fired timers. It performs
//! no I/O: time and randomness come from the [`Environment`], delays go
//! through the [`Scheduler`], and output is a [`RoomView`] pushed to every
//! [`RoomObserver`] after each state change.
//!
//! # Declined actions
//!
//! Apart from room-code validation, invalid requests (empty chat, unknown
//! participant, actions while disconnected) are silent no-ops. Each method
//! reports whether it did anything so callers and tests can tell.

use std::time::Duration;

use crate::{
    chat::{ChatLog, NoticeKind},
    config::EngineConfig,
    env::Environment,
    error::RoomError,
    participant::{Participant, ParticipantId, Role},
    presence::{PresencePhase, PresenceSimulator},
    room::{RoomCode, RoomState},
    schedule::{Scheduler, Timer, TimerTask},
    view::{RoomView, clipboard_preview, format_file_size},
};

const DEFAULT_USER_NAME: &str = "You";
const AUTO_SERVER: &str = "auto";

/// Receives a fresh view after every state change.
pub trait RoomObserver {
    /// Called with the current view. Must not assume anything about what
    /// changed.
    fn on_change(&mut self, view: &RoomView);
}

impl<F: FnMut(&RoomView)> RoomObserver for F {
    fn on_change(&mut self, view: &RoomView) {
        self(view);
    }
}

/// File offered through the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOffer {
    /// File name as shown to the user.
    pub file_name: String,
    /// Size in bytes.
    pub byte_size: u64,
}

/// Result of reading the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    /// Clipboard text (may be empty).
    Text(String),
    /// No clipboard access on this platform.
    Unavailable,
    /// Reading the clipboard failed.
    Denied,
}

/// The room simulation engine.
///
/// Generic over the [`Environment`] (clock, RNG) and [`Scheduler`] (timers)
/// so the same logic runs on Tokio and under a virtual clock.
pub struct RoomEngine<E: Environment, S: Scheduler> {
    env: E,
    scheduler: S,
    config: EngineConfig,
    room: RoomState,
    chat: ChatLog,
    presence: PresenceSimulator,
    demo_mode: bool,
    local_id: ParticipantId,
    local_name: String,
    joined_at: Option<E::Instant>,
    observers: Vec<Box<dyn RoomObserver>>,
}

impl<E: Environment, S: Scheduler> RoomEngine<E, S> {
    /// Create a disconnected engine. The local user's id is generated here
    /// and kept for the engine's lifetime.
    pub fn new(env: E, scheduler: S, config: EngineConfig) -> Self {
        let local_id = ParticipantId::generate(&env);
        let presence = PresenceSimulator::new(config.demo.clone());
        Self {
            env,
            scheduler,
            config,
            room: RoomState::new(),
            chat: ChatLog::new(),
            presence,
            demo_mode: false,
            local_id,
            local_name: DEFAULT_USER_NAME.to_string(),
            joined_at: None,
            observers: Vec::new(),
        }
    }

    /// Register an observer. It receives the current view immediately.
    pub fn subscribe(&mut self, mut observer: Box<dyn RoomObserver>) {
        observer.on_change(&self.view());
        self.observers.push(observer);
    }

    /// Rename the local user. Only allowed while disconnected.
    ///
    /// Blank names fall back to `You`. Returns `false` if connected.
    pub fn set_local_name(&mut self, name: &str) -> bool {
        if self.room.is_connected {
            tracing::debug!("rename ignored while connected");
            return false;
        }
        self.local_name = normalize_name(name);
        self.notify();
        true
    }

    /// Create a room with a fresh code.
    ///
    /// Demo mode is enabled when `server_url` is blank or `auto`.
    pub fn create_room(&mut self, user_name: &str, server_url: &str) -> Result<RoomCode, RoomError> {
        self.ensure_disconnected()?;

        let code = RoomCode::generate(&self.env);
        let server_url = server_url.trim();
        let demo = server_url.is_empty() || server_url.eq_ignore_ascii_case(AUTO_SERVER);

        self.enter_room(code.clone(), user_name, demo);
        tracing::info!(%code, demo, "room created");
        self.post_notice(NoticeKind::RoomCreated, format!("Room created! Share code: {code}"));
        self.notify();
        Ok(code)
    }

    /// Join a room by code. Always runs in demo mode.
    ///
    /// Fails without touching state if the normalized code is not six
    /// characters long.
    pub fn join_room(&mut self, code: &str, user_name: &str) -> Result<(), RoomError> {
        self.ensure_disconnected()?;
        let code = RoomCode::parse(code)?;

        self.enter_room(code.clone(), user_name, true);
        tracing::info!(%code, "room joined");
        self.post_notice(NoticeKind::RoomJoined, format!("Joined room {code}!"));
        self.notify();
        Ok(())
    }

    /// Leave the room: cancel every timer, then clear all session state.
    ///
    /// Returns `false` if not connected.
    pub fn leave_room(&mut self) -> bool {
        if !self.room.is_connected {
            return false;
        }

        self.presence.stop(&mut self.scheduler);
        self.scheduler.cancel_all();

        let code = self.room.code.take();
        self.room.disconnect();
        self.chat.clear();
        self.demo_mode = false;
        self.joined_at = None;

        tracing::info!(code = ?code.as_ref().map(RoomCode::as_str), "room left");
        self.notify();
        true
    }

    /// Add a participant. No-op (returns `false`) if the id is present or
    /// no room is active.
    pub fn add_participant(&mut self, participant: Participant) -> bool {
        if !self.room.is_connected {
            return false;
        }
        let added = self.room.participants.add(participant);
        if added {
            self.notify();
        }
        added
    }

    /// Remove a participant by id. The local user cannot be removed this
    /// way; use [`Self::leave_room`].
    pub fn remove_participant(&mut self, id: &ParticipantId) -> Option<Participant> {
        if id == &self.local_id {
            tracing::debug!("refusing to remove local user from roster");
            return None;
        }
        let removed = self.room.participants.remove(id);
        if removed.is_some() {
            self.notify();
        }
        removed
    }

    /// Moderator action: mute another participant.
    pub fn mute_participant(&mut self, id: &ParticipantId) -> bool {
        if !self.may_moderate(id) {
            return false;
        }
        let Some(participant) = self.room.participants.get_mut(id) else {
            return false;
        };
        participant.is_muted = true;
        let name = participant.name.clone();

        self.post_notice(NoticeKind::ParticipantMuted, format!("{name} has been muted"));
        self.notify();
        true
    }

    /// Moderator action: remove another participant from the room.
    pub fn kick_participant(&mut self, id: &ParticipantId) -> bool {
        if !self.may_moderate(id) {
            return false;
        }
        let Some(participant) = self.room.participants.remove(id) else {
            return false;
        };

        tracing::info!(participant = %participant.id, "participant kicked");
        self.post_notice(
            NoticeKind::ParticipantRemoved,
            format!("{} has been removed from the room", participant.name),
        );
        self.notify();
        true
    }

    /// Post a chat message from the local user.
    ///
    /// Blank input is ignored. In demo mode one synthetic reply is
    /// scheduled.
    pub fn send_local_message(&mut self, content: &str) -> bool {
        let content = content.trim();
        if content.is_empty() || !self.room.is_connected {
            return false;
        }

        let sent_at = self.env.wall_clock_secs();
        self.chat.post_message(self.local_name.clone(), content, true, sent_at);

        if self.demo_mode {
            self.presence.schedule_reply(&self.env, &mut self.scheduler);
        }
        self.notify();
        true
    }

    /// Append a chat message on behalf of anyone.
    ///
    /// Declined while disconnected: history only exists inside a session.
    pub fn post_message(&mut self, author: &str, content: &str, is_own: bool) -> bool {
        if !self.room.is_connected {
            tracing::debug!(author, "message outside a session ignored");
            return false;
        }
        let sent_at = self.env.wall_clock_secs();
        self.chat.post_message(author, content, is_own, sent_at);
        self.notify();
        true
    }

    /// Toggle the local microphone. Returns the new state, `None` if not
    /// connected.
    pub fn toggle_mute(&mut self) -> Option<bool> {
        let muted = self.update_local(|p| {
            p.is_muted = !p.is_muted;
            p.is_muted
        })?;
        self.notify();
        Some(muted)
    }

    /// Toggle the local camera.
    pub fn toggle_camera(&mut self) -> Option<bool> {
        let on = self.update_local(|p| {
            p.is_camera_on = !p.is_camera_on;
            p.is_camera_on
        })?;
        self.notify();
        Some(on)
    }

    /// Toggle local screen sharing.
    pub fn toggle_screen_share(&mut self) -> Option<bool> {
        let sharing = self.update_local(|p| {
            p.is_sharing_screen = !p.is_sharing_screen;
            p.is_sharing_screen
        })?;
        let text =
            if sharing { "You started sharing your screen" } else { "You stopped sharing your screen" };
        self.post_notice(NoticeKind::ScreenShare, text);
        self.notify();
        Some(sharing)
    }

    /// Toggle the local raised hand.
    pub fn toggle_raise_hand(&mut self) -> Option<bool> {
        let raised = self.update_local(|p| {
            p.hand_raised = !p.hand_raised;
            p.hand_raised
        })?;
        let text = if raised { "You raised your hand" } else { "You lowered your hand" };
        self.post_notice(NoticeKind::HandRaise, text);
        self.notify();
        Some(raised)
    }

    /// Log a file offered through the file picker.
    pub fn share_file(&mut self, offer: &FileOffer) -> bool {
        if !self.room.is_connected {
            return false;
        }
        self.post_notice(
            NoticeKind::FileShared,
            format!("File selected: {} ({})", offer.file_name, format_file_size(offer.byte_size)),
        );
        self.notify();
        true
    }

    /// Log shared clipboard content. Empty text is ignored.
    pub fn share_clipboard(&mut self, content: ClipboardContent) -> bool {
        if !self.room.is_connected {
            return false;
        }
        let text = match content {
            ClipboardContent::Text(text) if text.is_empty() => return false,
            ClipboardContent::Text(text) => {
                format!("Clipboard shared: {}", clipboard_preview(&text))
            },
            ClipboardContent::Unavailable => "Clipboard API not available".to_string(),
            ClipboardContent::Denied => "Could not access clipboard".to_string(),
        };
        self.post_notice(NoticeKind::Clipboard, text);
        self.notify();
        true
    }

    /// Process a fired timer.
    ///
    /// Timers the presence simulator no longer owns (cancelled, or from a
    /// previous session) are dropped without touching state.
    pub fn handle_timer(&mut self, timer: Timer) {
        if !self.presence.owns(timer.id) {
            tracing::debug!(id = %timer.id, task = ?timer.task, "dropping stale timer");
            return;
        }
        if !timer.task.is_repeating() {
            self.presence.release(timer.id);
            self.scheduler.cancel(timer.id);
        }

        let changed = match timer.task {
            TimerTask::DemoArrival { slot } => self.simulate_arrival(slot),
            TimerTask::ChatTick => self.simulate_chat(),
            TimerTask::SpeakingTick => self.simulate_speaking(),
            TimerTask::SyntheticReply => self.simulate_reply(),
        };
        if changed {
            self.notify();
        }
    }

    /// Current view.
    pub fn view(&self) -> RoomView {
        RoomView::build(&self.room, &self.chat, &self.local_id, &self.local_name, self.demo_mode)
    }

    /// Room state.
    pub fn room(&self) -> &RoomState {
        &self.room
    }

    /// Chat and notice history.
    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    /// Local user's id.
    pub fn local_id(&self) -> &ParticipantId {
        &self.local_id
    }

    /// Local user's display name.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Whether demo participants are simulated in this session.
    pub fn is_demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// Presence simulator phase.
    pub fn presence_phase(&self) -> PresencePhase {
        self.presence.phase()
    }

    /// Timers the presence simulator still tracks.
    pub fn pending_timers(&self) -> usize {
        self.presence.pending_timers()
    }

    /// Time since the current session started. `None` when disconnected.
    pub fn session_elapsed(&self) -> Option<Duration> {
        self.joined_at.map(|start| self.env.now() - start)
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Environment handle.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Scheduler handle.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable scheduler handle, for drivers that pull fired timers.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn ensure_disconnected(&self) -> Result<(), RoomError> {
        match &self.room.code {
            Some(code) if self.room.is_connected => {
                Err(RoomError::AlreadyConnected { code: code.to_string() })
            },
            _ => Ok(()),
        }
    }

    fn enter_room(&mut self, code: RoomCode, user_name: &str, demo: bool) {
        self.local_name = normalize_name(user_name);
        let local = Participant::new(self.local_id.clone(), self.local_name.clone(), Role::Moderator);

        self.chat.clear();
        self.room.connect(code, local);
        self.demo_mode = demo;
        self.joined_at = Some(self.env.now());
        self.presence = PresenceSimulator::new(self.config.demo.clone());

        if demo {
            self.presence.start(&self.env, &mut self.scheduler);
        }
    }

    fn may_moderate(&self, target: &ParticipantId) -> bool {
        if target == &self.local_id {
            tracing::debug!("moderator actions cannot target the local user");
            return false;
        }
        let is_moderator =
            self.room.participants.get(&self.local_id).is_some_and(Participant::is_moderator);
        if !is_moderator {
            tracing::debug!("local user is not a moderator");
        }
        is_moderator
    }

    fn update_local<T>(&mut self, apply: impl FnOnce(&mut Participant) -> T) -> Option<T> {
        let participant = self.room.participants.get_mut(&self.local_id)?;
        Some(apply(participant))
    }

    fn post_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        let sent_at = self.env.wall_clock_secs();
        self.chat.post_notice(kind, text, sent_at);
    }

    fn simulate_arrival(&mut self, slot: usize) -> bool {
        let participant = self.presence.arrival(slot, &self.env);
        let name = participant.name.clone();
        if !self.room.participants.add(participant) {
            return false;
        }
        tracing::debug!(slot, %name, "demo participant arrived");
        self.post_notice(NoticeKind::ParticipantJoined, format!("{name} joined the room"));
        true
    }

    fn simulate_chat(&mut self) -> bool {
        if self.room.participants.len() <= 1 {
            return false;
        }
        let others = self.room.participants.others(&self.local_id);
        let Some(line) = self.presence.chat_line(&self.env, &others) else {
            return false;
        };
        let sent_at = self.env.wall_clock_secs();
        self.chat.post_message(line.author, line.content, false, sent_at);
        true
    }

    fn simulate_speaking(&mut self) -> bool {
        if self.room.participants.len() <= 1 {
            return false;
        }
        let others = self.room.participants.others(&self.local_id);
        let Some(target) = self.presence.speaking_target(&self.env, &others) else {
            return false;
        };
        match self.room.participants.get_mut(&target) {
            Some(participant) => {
                participant.is_speaking = !participant.is_speaking;
                true
            },
            None => false,
        }
    }

    fn simulate_reply(&mut self) -> bool {
        let others = self.room.participants.others(&self.local_id);
        let Some(line) = self.presence.reply_line(&self.env, &others) else {
            return false;
        };
        let sent_at = self.env.wall_clock_secs();
        self.chat.post_message(line.author, line.content, false, sent_at);
        true
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        for observer in &mut self.observers {
            observer.on_change(&view);
        }
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() { DEFAULT_USER_NAME.to_string() } else { name.to_string() }
}
