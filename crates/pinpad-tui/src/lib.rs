//! Terminal UI for the PIN pad kiosk
//!
//! A thin shell over [`pinpad_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`pinpad_app::Runtime`].
//!
//! This crate only handles terminal rendering, the production environment,
//! and startup configuration.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod system_env;
pub mod terminal;
pub mod ui;

pub use config::KioskConfig;
pub use pinpad_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use system_env::SystemEnv;
pub use terminal::{TerminalDriver, TerminalError};
