//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`pinpad_app::Runtime`] orchestration code runs in both production and
//! simulation.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

use pinpad_app::{App, AppEvent, Driver, KeyInput, KeypadInput, Screen};
use pinpad_core::Environment;

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Shared state for event injection.
///
/// Clones of the driver share it, so a test can keep a handle after moving
/// the driver into a runtime.
#[derive(Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    renders: usize,
    screens: Vec<Screen>,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] so the same [`pinpad_app::Runtime`] orchestration
/// code runs in both the production TUI and simulation tests.
#[derive(Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        self.lock().pending_events.push_back(event);
    }

    /// Inject a key press.
    pub fn inject_key(&self, key: KeyInput) {
        self.inject_event(AppEvent::Key(key));
    }

    /// Inject every character of `text` as a key press.
    pub fn inject_text(&self, text: &str) {
        for c in text.chars() {
            self.inject_key(KeyInput::Char(c));
        }
    }

    /// Inject keypad presses at the given grid positions.
    pub fn inject_positions(&self, positions: &[u8]) {
        for &p in positions {
            self.inject_event(AppEvent::Keypad(KeypadInput::Position(p)));
        }
    }

    /// Inject a tick event.
    pub fn inject_tick(&self) {
        self.inject_event(AppEvent::Tick);
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        !self.lock().pending_events.is_empty()
    }

    /// Number of renders so far.
    pub fn render_count(&self) -> usize {
        self.lock().renders
    }

    /// Screen shown at each render, in order.
    pub fn rendered_screens(&self) -> Vec<Screen> {
        self.lock().screens.clone()
    }

    /// Whether the runtime stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(self.lock().pending_events.pop_front())
    }

    fn render<E: Environment>(&mut self, app: &App<E>) -> Result<(), Self::Error> {
        let mut state = self.lock();
        state.renders += 1;
        state.screens.push(app.screen());
        Ok(())
    }

    fn stop(&mut self) {
        tracing::debug!("Simulation driver stopped");
        self.lock().stopped = true;
    }
}
