//! Core types for the PIN pad kiosk
//!
//! Pure, UI-agnostic building blocks: the keypad layout, code generation,
//! the pin entry state machine, and the attempt record. Nothing in this crate
//! performs I/O; randomness and wall-clock time come from an [`Environment`]
//! so every component can be driven deterministically in tests.
//!
//! # Components
//!
//! - [`GridPosition`] / [`Digit`]: keypad layout (position → digit)
//! - [`PinCode`]: fixed-length code and its generator
//! - [`PinEntry`]: pin buffer state machine (press, backspace, submit, reset)
//! - [`Attempt`]: one recorded participant interaction

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod attempt;
mod code;
pub mod env;
mod error;
mod keypad;
mod pin;

pub use attempt::Attempt;
pub use code::{CODE_ALPHABET, PIN_LENGTH, PinCode};
pub use env::Environment;
pub use error::{CodeError, PinError};
pub use keypad::{Digit, GRID_SIZE, GridPosition};
pub use pin::{EnteredPin, PinEntry, PinState};
