//! Error types for the keypad core.
//!
//! [`PinError`] covers rejected pin submissions. [`CodeError`] covers values
//! that fail validation when they enter the system from outside (stored
//! records, parsed strings).

use thiserror::Error;

/// Errors produced by the pin entry state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    /// Submit attempted before the buffer was full.
    ///
    /// Recovered locally: the buffer is unchanged and the UI shows a
    /// transient "invalid" cue.
    #[error("incomplete input: {entered} of {expected} digits entered")]
    Incomplete {
        /// Digits currently buffered.
        entered: usize,
        /// Digits required for submission.
        expected: usize,
    },
}

/// Errors produced when validating digits, positions, and codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// Digit value outside `0..=9`.
    #[error("digit out of range: {0}")]
    DigitOutOfRange(u8),

    /// Grid position outside the keypad.
    #[error("grid position out of range: {0}")]
    PositionOutOfRange(u8),

    /// Character that is not an ASCII digit.
    #[error("not a digit: {0:?}")]
    NotADigit(char),

    /// Wrong number of digits or positions.
    #[error("expected {expected} digits, got {got}")]
    Length {
        /// Required length.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },
}
