//! Deterministic simulation harness for the PIN pad kiosk.
//!
//! Implementations of the Environment and Driver traits that make every run
//! reproducible: a seeded RNG, a manually advanced wall clock, and a scripted
//! event queue standing in for the terminal.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod sim_driver;
pub mod sim_env;

pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_env::SimEnv;
