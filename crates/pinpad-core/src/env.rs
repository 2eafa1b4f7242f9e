//! Environment abstraction for deterministic testing.
//!
//! Decouples kiosk logic from system resources (wall clock, randomness).
//! Production uses the OS RNG and system clock; simulation uses a seeded RNG
//! and a manually advanced clock.

use chrono::{DateTime, Utc};

/// Abstract environment providing wall-clock time and randomness.
///
/// Implementations MUST guarantee:
///
/// - `wall_clock()` returns UTC instants
/// - `random_bytes()` draws every byte uniformly from `0..=255`
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current wall-clock time.
    fn wall_clock(&self) -> DateTime<Utc>;

    /// Fills the provided buffer with random bytes.
    ///
    /// Given the same seed, simulation environments produce the same byte
    /// sequence.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a single random byte.
    fn random_u8(&self) -> u8 {
        let mut byte = [0u8; 1];
        self.random_bytes(&mut byte);
        byte[0]
    }
}
