//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two sources:
//! - User interactions (keyboard, keypad, resize, navigation) and ticks.
//! - Results of runtime side-effects (log snapshots, storage failures).

use pinpad_core::Attempt;

use crate::{KeyInput, KeypadInput};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input, interpreted per screen.
    Key(KeyInput),

    /// Keypad input. Only meaningful on the pin entry screen.
    Keypad(KeypadInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// External navigation intent.
    Navigate {
        /// `true` when the results view is requested.
        results: bool,
    },

    /// Operator override: show results regardless of navigation state.
    AdminShowResults,

    /// Snapshot of the result log, in insertion order.
    ResultsLoaded(Vec<Attempt>),

    /// Appending an attempt to the result log failed.
    StorageFailed {
        /// Error description.
        message: String,
    },
}
