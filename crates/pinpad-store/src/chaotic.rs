//! Chaotic result log wrapper for fault injection testing
//!
//! Wrapper that randomly fails operations to verify the kiosk keeps running
//! when storage misbehaves: failed reads must degrade to an empty list and
//! failed appends must not interrupt the participant flow.

use std::sync::{Arc, Mutex};

use pinpad_core::Attempt;

use super::{ResultLog, StorageError};

/// Chaotic log wrapper that randomly injects failures
///
/// Delegates to an underlying log but fails operations based on a configured
/// failure rate. Uses `Arc<Mutex<_>>` for the RNG state, making it Clone and
/// thread-safe.
#[derive(Clone)]
pub struct ChaoticLog<L: ResultLog> {
    inner: L,
    /// Failure rate for appends (0.0 = never fail, 1.0 = always fail)
    write_failure_rate: f64,
    /// Failure rate for reads
    read_failure_rate: f64,
    /// RNG state for deterministic chaos
    rng: Arc<Mutex<ChaoticRng>>,
}

/// Simple deterministic RNG for chaos injection
///
/// Linear congruential generator: fast, and reproducible with the same seed.
struct ChaoticRng {
    state: u64,
}

impl ChaoticRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate next random value [0.0, 1.0)
    fn next(&mut self) -> f64 {
        // LCG constants from Numerical Recipes
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        (self.state as f64) / (M as f64)
    }
}

impl<L: ResultLog> ChaoticLog<L> {
    /// Wrap `inner`, failing both reads and appends at `failure_rate`.
    pub fn new(inner: L, failure_rate: f64) -> Self {
        Self::with_rates(inner, failure_rate, failure_rate, 0x1234_5678_9ABC_DEF0)
    }

    /// Wrap `inner` with separate read and write failure rates and an explicit
    /// seed for reproducible chaos.
    ///
    /// Rates are clamped to [0.0, 1.0].
    pub fn with_rates(inner: L, read_failure_rate: f64, write_failure_rate: f64, seed: u64) -> Self {
        Self {
            inner,
            write_failure_rate: write_failure_rate.clamp(0.0, 1.0),
            read_failure_rate: read_failure_rate.clamp(0.0, 1.0),
            rng: Arc::new(Mutex::new(ChaoticRng::new(seed))),
        }
    }

    /// The wrapped log.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    fn should_fail(&self, rate: f64) -> Result<bool, StorageError> {
        let mut rng =
            self.rng.lock().map_err(|_| StorageError::Io("chaos rng mutex poisoned".into()))?;
        Ok(rng.next() < rate)
    }
}

impl<L: ResultLog> ResultLog for ChaoticLog<L> {
    fn append(&self, attempt: &Attempt) -> Result<(), StorageError> {
        if self.should_fail(self.write_failure_rate)? {
            return Err(StorageError::Io("injected append failure".into()));
        }
        self.inner.append(attempt)
    }

    fn list_all(&self) -> Result<Vec<Attempt>, StorageError> {
        if self.should_fail(self.read_failure_rate)? {
            return Err(StorageError::Io("injected read failure".into()));
        }
        self.inner.list_all()
    }
}
