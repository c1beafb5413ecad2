//! Simulated environment with a virtual clock and seeded RNG.
//!
//! Clones share the same clock and RNG, so the engine, the scheduler and
//! the test all observe one timeline. Time only moves when the scheduler or
//! driver advances it.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    ops::Sub,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use castor_core::Environment;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Wall-clock origin of every simulation (2023-11-14T22:13:20Z).
pub const SIM_EPOCH_SECS: u64 = 1_700_000_000;

/// Virtual instant: time elapsed since the simulation started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimInstant(Duration);

impl SimInstant {
    /// Time since simulation start.
    pub fn elapsed(self) -> Duration {
        self.0
    }
}

impl Sub for SimInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

struct SimState {
    rng: ChaCha8Rng,
    elapsed: Duration,
}

/// Deterministic environment for simulation tests.
#[derive(Clone)]
pub struct SimEnv {
    state: Arc<Mutex<SimState>>,
}

impl SimEnv {
    /// Create an environment whose RNG is seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let state = SimState { rng: ChaCha8Rng::seed_from_u64(seed), elapsed: Duration::ZERO };
        Self { state: Arc::new(Mutex::new(state)) }
    }

    /// Virtual time since simulation start.
    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed
    }

    /// Move the clock forward to `target`. Never moves it backwards.
    pub fn advance_to(&self, target: Duration) {
        let mut state = self.lock();
        if target > state.elapsed {
            state.elapsed = target;
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Environment for SimEnv {
    type Instant = SimInstant;

    fn now(&self) -> SimInstant {
        SimInstant(self.elapsed())
    }

    fn wall_clock_secs(&self) -> u64 {
        SIM_EPOCH_SECS + self.elapsed().as_secs()
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        self.lock().rng.fill_bytes(buffer);
    }
}
