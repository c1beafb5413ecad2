//! Deterministic simulation harness for the Castor room engine.
//!
//! Virtual-clock implementations of [`castor_core::Environment`] and
//! [`castor_core::Scheduler`], plus a driver that delivers due timers to
//! the engine. A seed fully determines a run, so property tests replay.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties that must hold after every
//! command and every fired timer. Use [`InvariantRegistry::standard()`]
//! for the common set.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod observer;
pub mod operation;
pub mod sim_driver;
pub mod sim_env;
pub mod sim_scheduler;

pub use invariants::{
    CodeMatchesConnection, EngineSnapshot, Invariant, InvariantRegistry, InvariantResult,
    LocalUserPresent, LogClearedWhenDisconnected, PresenceQuiescence, UniqueParticipants,
    Violation,
};
pub use observer::RecordingObserver;
pub use operation::Operation;
pub use sim_driver::SimDriver;
pub use sim_env::{SIM_EPOCH_SECS, SimEnv, SimInstant};
pub use sim_scheduler::SimScheduler;
