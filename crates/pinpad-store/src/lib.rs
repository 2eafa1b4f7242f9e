//! Result log for the PIN pad kiosk
//!
//! Trait-based abstraction for the append-only attempt log. The trait is
//! synchronous; every backend behaves like a key-value store holding one key,
//! [`RESULTS_KEY`], whose value is a JSON array of [`StoredAttempt`] records.
//!
//! # Backends
//!
//! - [`MemoryLog`]: in-process, for tests and simulation
//! - [`RedbLog`]: durable, survives restarts
//! - [`ChaoticLog`]: wrapper that injects failures for fault testing

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chaotic;
mod error;
mod memory;
mod record;
mod redb;

pub use chaotic::ChaoticLog;
pub use error::StorageError;
pub use memory::MemoryLog;
use pinpad_core::Attempt;
pub use record::{RESULTS_KEY, StoredAttempt, append_raw, decode_log};

pub use self::redb::RedbLog;

/// Append-only log of attempts.
///
/// Must be Clone (the runtime and operator tools may hold handles to the same
/// log), Send + Sync, and synchronous. Implementations share internal state,
/// so clones observe the same entries. All access is serialized by the
/// backend, preserving a single-writer view.
pub trait ResultLog: Clone + Send + Sync + 'static {
    /// Durably record an attempt.
    ///
    /// # Invariants
    ///
    /// - Post: the attempt is the last element returned by `list_all`
    fn append(&self, attempt: &Attempt) -> Result<(), StorageError>;

    /// All recorded attempts in insertion order, earliest first.
    ///
    /// Returns an empty list if nothing was recorded. A corrupt stored value
    /// is reported as [`StorageError::Corrupt`].
    fn list_all(&self) -> Result<Vec<Attempt>, StorageError>;
}

/// Read the log, degrading any read failure to an empty list.
///
/// Storage read faults are never surfaced to the participant.
pub fn load_or_empty<L: ResultLog>(log: &L) -> Vec<Attempt> {
    match log.list_all() {
        Ok(attempts) => attempts,
        Err(e) => {
            tracing::warn!("Failed to read result log, treating as empty: {e}");
            Vec::new()
        },
    }
}
