//! Timer scheduling abstraction.
//!
//! The engine never sleeps or spawns. It asks a [`Scheduler`] to deliver a
//! [`TimerTask`] later, and the runtime hands fired [`Timer`]s back to
//! [`crate::RoomEngine::handle_timer`]. Production backs this with Tokio
//! timers; tests use a virtual clock.

use std::{fmt, time::Duration};

/// Handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Wrap a raw id. Schedulers allocate these.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric id.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Inject the demo participant for this arrival slot.
    DemoArrival {
        /// Zero-based arrival index; also selects the name.
        slot: usize,
    },
    /// Maybe post a synthetic chat message (repeating).
    ChatTick,
    /// Maybe toggle someone's speaking flag (repeating).
    SpeakingTick,
    /// Post one synthetic reply to a local message.
    SyntheticReply,
}

impl TimerTask {
    /// Whether this task is scheduled with [`Scheduler::every`].
    pub fn is_repeating(self) -> bool {
        matches!(self, Self::ChatTick | Self::SpeakingTick)
    }
}

/// A fired timer delivered back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// Handle returned when it was scheduled.
    pub id: TimerId,
    /// Task to run.
    pub task: TimerTask,
}

/// Schedules timer deliveries.
///
/// # Invariants
///
/// - Timers are delivered in deadline order; ties in scheduling order.
/// - A cancelled timer is never delivered by the scheduler afterwards.
/// - Cancelling an unknown or already-fired id is a no-op that releases any
///   bookkeeping held for it.
pub trait Scheduler {
    /// Deliver `task` once after `delay`.
    fn after(&mut self, delay: Duration, task: TimerTask) -> TimerId;

    /// Deliver `task` every `period`, first after one period.
    fn every(&mut self, period: Duration, task: TimerTask) -> TimerId;

    /// Cancel a single timer.
    fn cancel(&mut self, id: TimerId);

    /// Cancel every outstanding timer.
    fn cancel_all(&mut self);
}
