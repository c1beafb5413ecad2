//! Observable state snapshots for invariant checking.
//!
//! Invariants run against a snapshot rather than the live engine so every
//! check sees one consistent moment.

use castor_core::{PresencePhase, RoomEngine};

use crate::{SimEnv, SimScheduler};

/// Snapshot of one engine and its scheduler.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    /// Active room code.
    pub code: Option<String>,
    /// Whether a session is active.
    pub is_connected: bool,
    /// Whether the session simulates demo participants.
    pub demo_mode: bool,
    /// Local user's id.
    pub local_id: String,
    /// Roster ids in join order.
    pub participant_ids: Vec<String>,
    /// Chat messages in the log.
    pub message_count: usize,
    /// System notices in the log.
    pub notice_count: usize,
    /// Presence simulator phase.
    pub presence_phase: PresencePhase,
    /// Timers the presence simulator tracks.
    pub presence_timers: usize,
    /// Timers outstanding in the scheduler.
    pub scheduled_timers: usize,
}

impl EngineSnapshot {
    /// Disconnected engine with nothing scheduled.
    pub fn empty() -> Self {
        Self {
            code: None,
            is_connected: false,
            demo_mode: false,
            local_id: String::new(),
            participant_ids: Vec::new(),
            message_count: 0,
            notice_count: 0,
            presence_phase: PresencePhase::Idle,
            presence_timers: 0,
            scheduled_timers: 0,
        }
    }

    /// Capture the current state of a simulated engine.
    pub fn capture(engine: &RoomEngine<SimEnv, SimScheduler>) -> Self {
        let room = engine.room();
        Self {
            code: room.code.as_ref().map(ToString::to_string),
            is_connected: room.is_connected,
            demo_mode: engine.is_demo_mode(),
            local_id: engine.local_id().to_string(),
            participant_ids: room.participants.iter().map(|p| p.id.to_string()).collect(),
            message_count: engine.chat().messages().len(),
            notice_count: engine.chat().notices().len(),
            presence_phase: engine.presence_phase(),
            presence_timers: engine.pending_timers(),
            scheduled_timers: engine.scheduler().pending(),
        }
    }
}
