//! Standard invariant checks.
//!
//! Each check states a property that holds after every command and every
//! fired timer, whatever happened before.

use std::collections::HashSet;

use castor_core::PresencePhase;

use super::{EngineSnapshot, Invariant, InvariantResult, Violation};

/// A room code is set exactly when a session is active.
pub struct CodeMatchesConnection;

impl Invariant for CodeMatchesConnection {
    fn name(&self) -> &'static str {
        "CodeMatchesConnection"
    }

    fn check(&self, state: &EngineSnapshot) -> InvariantResult {
        if state.code.is_some() != state.is_connected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "code {:?} with is_connected = {}",
                    state.code, state.is_connected
                ),
            });
        }
        Ok(())
    }
}

/// The local user is in the roster while connected, and the roster is
/// empty otherwise.
pub struct LocalUserPresent;

impl Invariant for LocalUserPresent {
    fn name(&self) -> &'static str {
        "LocalUserPresent"
    }

    fn check(&self, state: &EngineSnapshot) -> InvariantResult {
        let present = state.participant_ids.contains(&state.local_id);
        if state.is_connected && !present {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "connected but local user {} missing from {:?}",
                    state.local_id, state.participant_ids
                ),
            });
        }
        if !state.is_connected && !state.participant_ids.is_empty() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("disconnected with roster {:?}", state.participant_ids),
            });
        }
        Ok(())
    }
}

/// No participant id appears twice.
pub struct UniqueParticipants;

impl Invariant for UniqueParticipants {
    fn name(&self) -> &'static str {
        "UniqueParticipants"
    }

    fn check(&self, state: &EngineSnapshot) -> InvariantResult {
        let mut seen = HashSet::new();
        for id in &state.participant_ids {
            if !seen.insert(id) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("duplicate participant {id}"),
                });
            }
        }
        Ok(())
    }
}

/// Leaving wipes the chat log.
pub struct LogClearedWhenDisconnected;

impl Invariant for LogClearedWhenDisconnected {
    fn name(&self) -> &'static str {
        "LogClearedWhenDisconnected"
    }

    fn check(&self, state: &EngineSnapshot) -> InvariantResult {
        if !state.is_connected && (state.message_count > 0 || state.notice_count > 0) {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "disconnected with {} messages and {} notices",
                    state.message_count, state.notice_count
                ),
            });
        }
        Ok(())
    }
}

/// The presence simulator runs exactly during demo sessions, and its
/// timers are a subset of what the scheduler holds.
///
/// Once disconnected nothing may be scheduled at all.
pub struct PresenceQuiescence;

impl Invariant for PresenceQuiescence {
    fn name(&self) -> &'static str {
        "PresenceQuiescence"
    }

    fn check(&self, state: &EngineSnapshot) -> InvariantResult {
        let running = state.presence_phase == PresencePhase::Running;
        let expected = state.is_connected && state.demo_mode;
        if running != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "phase {:?} with is_connected = {}, demo_mode = {}",
                    state.presence_phase, state.is_connected, state.demo_mode
                ),
            });
        }
        if state.presence_timers > state.scheduled_timers {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "presence tracks {} timers but only {} are scheduled",
                    state.presence_timers, state.scheduled_timers
                ),
            });
        }
        if !state.is_connected && state.scheduled_timers > 0 {
            return Err(Violation {
                invariant: self.name(),
                message: format!("{} timers outstanding after leave", state.scheduled_timers),
            });
        }
        Ok(())
    }
}
