//! Demo-mode presence simulator.
//!
//! Fakes other participants: staggered arrivals, periodic chat, speaking
//! flicker and replies to the local user. The simulator only decides WHAT
//! happens and tracks the timers it asked for; the engine applies the
//! decisions to the roster and chat log.
//!
//! # State Machine
//!
//! ```text
//! Idle --start--> Running --stop--> Stopped
//! ```
//!
//! Every timer scheduled while `Running` is tracked. `stop` cancels all of
//! them, and the engine drops any delivered timer the simulator no longer
//! owns, so nothing mutates state after a stop.

use std::collections::BTreeSet;

use crate::{
    config::DemoConfig,
    env::Environment,
    participant::{Participant, ParticipantId, Role},
    schedule::{Scheduler, TimerId, TimerTask},
};

const FALLBACK_NAME: &str = "Guest";

/// Lifecycle phase of the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresencePhase {
    /// Not started.
    Idle,
    /// Timers armed, generating activity.
    Running,
    /// Torn down; terminal for this session.
    Stopped,
}

/// Synthetic chat line chosen by the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticLine {
    /// Display name of the demo participant posting it.
    pub author: String,
    /// Line text.
    pub content: String,
}

/// Timer-driven generator of fake participant activity.
#[derive(Debug, Clone)]
pub struct PresenceSimulator {
    phase: PresencePhase,
    timers: BTreeSet<TimerId>,
    config: DemoConfig,
}

impl PresenceSimulator {
    /// Create an idle simulator.
    pub fn new(config: DemoConfig) -> Self {
        Self { phase: PresencePhase::Idle, timers: BTreeSet::new(), config }
    }

    /// Current phase.
    pub fn phase(&self) -> PresencePhase {
        self.phase
    }

    /// Whether the simulator is generating activity.
    pub fn is_running(&self) -> bool {
        self.phase == PresencePhase::Running
    }

    /// Tuning in effect.
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Number of timers still tracked.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether `id` is a live timer of this simulator.
    pub fn owns(&self, id: TimerId) -> bool {
        self.timers.contains(&id)
    }

    /// Arm arrivals and both repeating generators.
    ///
    /// Returns the number of demo arrivals scheduled. Only valid from
    /// `Idle`; any other phase is a no-op returning 0.
    pub fn start<E: Environment, S: Scheduler>(&mut self, env: &E, scheduler: &mut S) -> usize {
        if self.phase != PresencePhase::Idle {
            tracing::debug!(phase = ?self.phase, "presence simulator already started");
            return 0;
        }

        let min = self.config.min_arrivals;
        let span = self.config.max_arrivals.saturating_sub(min) as u64 + 1;
        let arrivals = min + env.random_below(span) as usize;

        for slot in 0..arrivals {
            let id = scheduler.after(self.config.arrival_delay(slot), TimerTask::DemoArrival { slot });
            self.timers.insert(id);
        }
        self.timers.insert(scheduler.every(self.config.chat_period, TimerTask::ChatTick));
        self.timers.insert(scheduler.every(self.config.speaking_period, TimerTask::SpeakingTick));

        self.phase = PresencePhase::Running;
        tracing::debug!(arrivals, "presence simulator running");
        arrivals
    }

    /// Cancel every tracked timer and enter `Stopped`.
    pub fn stop<S: Scheduler>(&mut self, scheduler: &mut S) {
        for id in std::mem::take(&mut self.timers) {
            scheduler.cancel(id);
        }
        self.phase = PresencePhase::Stopped;
    }

    /// Schedule one synthetic reply. `None` unless running.
    pub fn schedule_reply<E: Environment, S: Scheduler>(
        &mut self,
        env: &E,
        scheduler: &mut S,
    ) -> Option<TimerId> {
        if !self.is_running() {
            return None;
        }
        let delay = env.random_duration(self.config.reply_delay.clone());
        let id = scheduler.after(delay, TimerTask::SyntheticReply);
        self.timers.insert(id);
        Some(id)
    }

    /// Forget a one-shot timer after it fired. Returns `false` if untracked.
    pub fn release(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id)
    }

    /// Build the demo participant for an arrival slot.
    ///
    /// Names cycle through the configured pool by slot.
    pub fn arrival<E: Environment>(&self, slot: usize, env: &E) -> Participant {
        let name = if self.config.names.is_empty() {
            FALLBACK_NAME
        } else {
            self.config.names[slot % self.config.names.len()].as_str()
        };

        let mut participant = Participant::new(ParticipantId::generate(env), name, Role::Member);
        participant.is_muted = env.chance(self.config.muted_probability);
        participant.is_camera_on = env.chance(self.config.camera_probability);
        participant
    }

    /// Chat tick: maybe pick a demo participant and a line.
    ///
    /// `others` excludes the local user.
    pub fn chat_line<E: Environment>(
        &self,
        env: &E,
        others: &[&Participant],
    ) -> Option<SyntheticLine> {
        if others.is_empty() || !env.chance(self.config.chat_probability) {
            return None;
        }
        Self::pick_line(env, others, &self.config.messages)
    }

    /// Reply tick: pick a demo participant and a reply line.
    pub fn reply_line<E: Environment>(
        &self,
        env: &E,
        others: &[&Participant],
    ) -> Option<SyntheticLine> {
        Self::pick_line(env, others, &self.config.replies)
    }

    /// Flicker tick: maybe pick whose speaking flag to toggle.
    pub fn speaking_target<E: Environment>(
        &self,
        env: &E,
        others: &[&Participant],
    ) -> Option<ParticipantId> {
        let participant = others.get(env.random_index(others.len()))?;
        env.chance(self.config.speaking_probability).then(|| participant.id.clone())
    }

    fn pick_line<E: Environment>(
        env: &E,
        others: &[&Participant],
        pool: &[String],
    ) -> Option<SyntheticLine> {
        let participant = others.get(env.random_index(others.len()))?;
        let content = pool.get(env.random_index(pool.len()))?;
        Some(SyntheticLine { author: participant.name.clone(), content: content.clone() })
    }
}
