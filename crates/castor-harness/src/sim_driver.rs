//! Simulation driver.
//!
//! `SimDriver` plays the role the Tokio runtime plays in the terminal
//! client: it owns the engine, pulls due timers from the virtual scheduler
//! and feeds them back through [`RoomEngine::handle_timer`]. Because time
//! only moves inside [`SimDriver::advance`], a seed fully determines a run.

use std::time::Duration;

use castor_core::{
    ClipboardContent, EngineConfig, FileOffer, ParticipantId, RoomEngine, RoomError,
};

use crate::{
    EngineSnapshot, InvariantRegistry, Operation, RecordingObserver, SimEnv, SimScheduler,
};

/// Deterministic driver around a simulated [`RoomEngine`].
pub struct SimDriver {
    engine: RoomEngine<SimEnv, SimScheduler>,
    env: SimEnv,
    invariants: Option<InvariantRegistry>,
    fired: usize,
}

impl SimDriver {
    /// Create a driver with default tuning.
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, EngineConfig::default())
    }

    /// Create a driver with custom tuning.
    pub fn with_config(seed: u64, config: EngineConfig) -> Self {
        let env = SimEnv::with_seed(seed);
        let scheduler = SimScheduler::new(env.clone());
        let engine = RoomEngine::new(env.clone(), scheduler, config);
        Self { engine, env, invariants: None, fired: 0 }
    }

    /// Enable invariant checking after every operation and fired timer.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Subscribe a fresh recorder and return a handle to it.
    pub fn record(&mut self) -> RecordingObserver {
        let recorder = RecordingObserver::new();
        self.engine.subscribe(recorder.boxed());
        recorder
    }

    /// The engine under test.
    pub fn engine(&self) -> &RoomEngine<SimEnv, SimScheduler> {
        &self.engine
    }

    /// Mutable engine, for commands not covered by [`Operation`].
    pub fn engine_mut(&mut self) -> &mut RoomEngine<SimEnv, SimScheduler> {
        &mut self.engine
    }

    /// Shared simulated environment.
    pub fn env(&self) -> &SimEnv {
        &self.env
    }

    /// Virtual time since simulation start.
    pub fn elapsed(&self) -> Duration {
        self.env.elapsed()
    }

    /// Timers delivered to the engine so far.
    pub fn fired(&self) -> usize {
        self.fired
    }

    /// Let `by` of virtual time pass, delivering every timer that falls due.
    ///
    /// Returns the number of timers delivered.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.env.elapsed() + by;
        let mut delivered = 0;

        while let Some(timer) = self.engine.scheduler_mut().pop_due(target) {
            tracing::trace!(id = %timer.id, task = ?timer.task, at = ?self.env.elapsed(), "timer fired");
            self.engine.handle_timer(timer);
            delivered += 1;
            self.check_invariants("after timer");
        }

        self.env.advance_to(target);
        self.fired += delivered;
        delivered
    }

    /// Apply one operation, then check invariants.
    ///
    /// Returns whether the engine accepted it. Only room creation and joins
    /// report errors.
    pub fn apply(&mut self, operation: &Operation) -> Result<bool, RoomError> {
        let local = self.engine.local_name().to_string();
        let outcome = match operation {
            Operation::Create { server } => self.engine.create_room(&local, server).map(|_| true),
            Operation::Join { code } => self.engine.join_room(code, &local).map(|()| true),
            Operation::Leave => Ok(self.engine.leave_room()),
            Operation::Rename(name) => Ok(self.engine.set_local_name(name)),
            Operation::Send(text) => Ok(self.engine.send_local_message(text)),
            Operation::ToggleMute => Ok(self.engine.toggle_mute().is_some()),
            Operation::ToggleCamera => Ok(self.engine.toggle_camera().is_some()),
            Operation::ToggleScreenShare => Ok(self.engine.toggle_screen_share().is_some()),
            Operation::ToggleHand => Ok(self.engine.toggle_raise_hand().is_some()),
            Operation::MuteOther(index) => {
                Ok(self.other_at(*index).is_some_and(|id| self.engine.mute_participant(&id)))
            },
            Operation::KickOther(index) => {
                Ok(self.other_at(*index).is_some_and(|id| self.engine.kick_participant(&id)))
            },
            Operation::ShareFile(size) => Ok(self.engine.share_file(&FileOffer {
                file_name: "upload.bin".to_string(),
                byte_size: *size,
            })),
            Operation::ShareClipboard(text) => {
                Ok(self.engine.share_clipboard(ClipboardContent::Text(text.clone())))
            },
            Operation::Advance(by) => {
                self.advance(*by);
                Ok(true)
            },
        };
        // Checked even when a create or join is rejected.
        self.check_invariants(&format!("after {operation:?}"));
        outcome
    }

    /// Snapshot of the current engine state.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(&self.engine)
    }

    /// Check registered invariants, panicking on violation.
    pub fn check_invariants(&self, context: &str) {
        if let Some(ref registry) = self.invariants {
            registry.assert_all(&self.snapshot(), context);
        }
    }

    fn other_at(&self, index: usize) -> Option<ParticipantId> {
        let others = self.engine.room().participants.others(self.engine.local_id());
        if others.is_empty() {
            return None;
        }
        Some(others[index % others.len()].id.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{Invariant, InvariantResult};

    /// Counts how often the registry runs.
    struct CountChecks(Arc<AtomicUsize>);

    impl Invariant for CountChecks {
        fn name(&self) -> &'static str {
            "CountChecks"
        }

        fn check(&self, _state: &EngineSnapshot) -> InvariantResult {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn counted_driver(seed: u64) -> (SimDriver, Arc<AtomicUsize>) {
        let checks = Arc::new(AtomicUsize::new(0));
        let mut registry = InvariantRegistry::standard();
        registry.add(CountChecks(Arc::clone(&checks)));
        (SimDriver::new(seed).with_invariants(registry), checks)
    }

    #[test]
    fn rejected_join_is_still_checked() {
        let (mut driver, checks) = counted_driver(1);

        let result = driver.apply(&Operation::Join { code: "AB12".to_string() });
        assert!(matches!(result, Err(RoomError::InvalidRoomCode { length: 4, .. })));
        assert_eq!(checks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejected_create_is_still_checked() {
        let (mut driver, checks) = counted_driver(2);
        driver.apply(&Operation::Create { server: "auto".to_string() }).unwrap();
        let before = checks.load(Ordering::SeqCst);

        let result = driver.apply(&Operation::Create { server: "auto".to_string() });
        assert!(matches!(result, Err(RoomError::AlreadyConnected { .. })));
        assert_eq!(checks.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn accepted_operations_report_true() {
        let (mut driver, _) = counted_driver(3);
        assert_eq!(driver.apply(&Operation::Leave), Ok(false));
        assert_eq!(driver.apply(&Operation::Create { server: String::new() }), Ok(true));
        assert_eq!(driver.apply(&Operation::Send("hi".to_string())), Ok(true));
    }
}
