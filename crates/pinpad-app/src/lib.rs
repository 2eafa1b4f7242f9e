//! Application layer for the PIN pad kiosk
//!
//! Pure state machines and a generic runtime, so the exact code that drives
//! the terminal kiosk also runs in deterministic simulation tests.
//!
//! # Components
//!
//! - [`App`]: screen controller (name entry, pin entry, results)
//! - [`Session`]: one participant's name, target code, and pin buffer
//! - [`ResultsView`]: results viewer (escaped, match-annotated rows)
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic orchestration loop using a Driver and a result log

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod runtime;
mod state;
pub mod view;

pub use action::AppAction;
pub use app::{App, SHAKE_TICKS};
pub use driver::Driver;
pub use event::AppEvent;
pub use input::{KeyInput, KeypadInput};
pub use runtime::Runtime;
pub use state::{NameField, Screen, Session};
pub use view::{Outcome, ResultRow, ResultsView, escape_control, escape_markup};
