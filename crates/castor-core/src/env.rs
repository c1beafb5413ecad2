//! Environment abstraction for deterministic testing.
//!
//! Decouples the room engine from system resources (time, randomness). The
//! simulation harness supplies a virtual clock and a seeded RNG; the terminal
//! client supplies the system clock and OS entropy.

use std::{ops::Range, time::Duration};

/// Abstract environment providing time and randomness.
///
/// # Invariants
///
/// Implementations MUST guarantee:
///
/// - `now()` never goes backwards
/// - Given the same seed, `random_bytes()` produces the same sequence
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production uses `std::time::Instant`, simulation uses virtual time.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Wall-clock seconds since the Unix epoch.
    ///
    /// Only used to stamp chat messages and notices for display.
    fn wall_clock_secs(&self) -> u64;

    /// Fills the provided buffer with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Uniform integer in `0..bound`. Returns 0 when `bound` is 0.
    ///
    /// Uses rejection sampling so every value is equally likely.
    fn random_below(&self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        // Largest accepted value; `limit + 1` is a multiple of `bound`.
        let limit = u64::MAX - (u64::MAX - bound + 1) % bound;
        loop {
            let value = self.random_u64();
            if value <= limit {
                return value % bound;
            }
        }
    }

    /// Uniform index into a slice of length `len`.
    fn random_index(&self, len: usize) -> usize {
        self.random_below(len as u64) as usize
    }

    /// Uniform float in `[0, 1)` with 53 bits of precision.
    fn random_unit(&self) -> f64 {
        (self.random_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns `true` with the given probability.
    fn chance(&self, probability: f64) -> bool {
        self.random_unit() < probability
    }

    /// Uniform duration in `range` at millisecond granularity.
    ///
    /// An empty range yields its start.
    fn random_duration(&self, range: Range<Duration>) -> Duration {
        let span = range.end.saturating_sub(range.start).as_millis() as u64;
        range.start + Duration::from_millis(self.random_below(span))
    }
}
