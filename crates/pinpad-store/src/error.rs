//! Storage error types.

use thiserror::Error;

/// Errors from result log backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend I/O failure (open, transaction, commit, lock).
    ///
    /// On read this degrades to an empty log; on append the attempt is lost
    /// and the failure is reported to the runtime.
    #[error("I/O error: {0}")]
    Io(String),

    /// Stored value is not a valid JSON array of attempt records.
    #[error("corrupt result log: {0}")]
    Corrupt(String),

    /// Encoding the log for storage failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}
