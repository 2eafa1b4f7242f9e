//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use pinpad_core::Attempt;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Append a finished attempt to the result log.
    RecordAttempt(Attempt),

    /// Read a snapshot of the result log and feed it back as
    /// [`crate::AppEvent::ResultsLoaded`].
    LoadResults,
}
