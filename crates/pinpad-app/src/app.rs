//! Screen controller.
//!
//! This module defines the [`App`] state machine, which owns everything the
//! participant sees: the active screen, the name field, the running session,
//! the last results snapshot, and transient cues (shake, status line).
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute. It
//! never touches the result log directly; recording and loading are actions.
//!
//! # Responsibilities
//!
//! - Arms the start action only while the trimmed name is non-empty.
//! - Creates a [`Session`] on start and consumes it on submit or back.
//! - Routes keyboard input per screen (name editing, keypad, navigation).
//! - Counts down the shake cue on ticks.

use pinpad_core::{Digit, Environment, GridPosition, PinError};

use crate::{AppAction, AppEvent, KeyInput, KeypadInput, NameField, ResultsView, Screen, Session};

/// Number of ticks the shake cue stays visible (100 ms each).
pub const SHAKE_TICKS: u8 = 4;

/// Function key that forces the results screen.
const ADMIN_KEY: u8 = 12;

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App<E: Environment> {
    /// Randomness and wall clock.
    env: E,
    /// Active screen.
    screen: Screen,
    /// Name being typed on the name screen.
    name: NameField,
    /// Running participant session. `Some` exactly while on the pin screen.
    session: Option<Session>,
    /// Last results snapshot.
    results: ResultsView,
    /// Remaining ticks of the shake cue. Zero when not shaking.
    shake_ticks: u8,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl<E: Environment> App<E> {
    /// Create a new App on the name screen.
    pub fn new(env: E) -> Self {
        Self {
            env,
            screen: Screen::NameEntry,
            name: NameField::new(),
            session: None,
            results: ResultsView::Empty,
            shake_ticks: 0,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Keypad(input) => self.handle_keypad(input),
            AppEvent::Tick => {
                if self.shake_ticks == 0 {
                    return vec![];
                }
                self.shake_ticks -= 1;
                if self.shake_ticks == 0 { vec![AppAction::Render] } else { vec![] }
            },
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Navigate { results } => self.navigate(results),
            AppEvent::AdminShowResults => self.show_admin_results(),
            AppEvent::ResultsLoaded(attempts) => {
                self.results = ResultsView::from_attempts(&attempts);
                self.session = None;
                self.enter_screen(Screen::Results);
                vec![AppAction::Render]
            },
            AppEvent::StorageFailed { message } => {
                self.status_message = Some(format!("Could not save result: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if key == KeyInput::F(ADMIN_KEY) {
            return self.show_admin_results();
        }

        match self.screen {
            Screen::NameEntry => self.handle_name_key(key),
            Screen::PinEntry => match key {
                KeyInput::Char(c) => match c.to_digit(10) {
                    Some(d) => self.press_digit(d as u8),
                    None => {
                        tracing::debug!("Ignoring non-digit key {c:?} on pin screen");
                        vec![]
                    },
                },
                KeyInput::Backspace => self.backspace(),
                KeyInput::Enter => self.submit(),
                KeyInput::Esc => self.back(),
                _ => vec![],
            },
            Screen::Results => match key {
                KeyInput::Esc | KeyInput::Backspace => self.navigate(false),
                _ => vec![],
            },
        }
    }

    fn handle_name_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) if !c.is_control() => self.name.insert(c),
            KeyInput::Char(_) => return vec![],
            KeyInput::Backspace => self.name.backspace(),
            KeyInput::Delete => self.name.delete(),
            KeyInput::Left => self.name.left(),
            KeyInput::Right => self.name.right(),
            KeyInput::Home => self.name.home(),
            KeyInput::End => self.name.end(),
            KeyInput::Enter => return self.start(),
            KeyInput::Tab => return self.navigate(true),
            KeyInput::Esc => return self.quit(),
            KeyInput::F(_) => return vec![],
        }
        vec![AppAction::Render]
    }

    fn handle_keypad(&mut self, input: KeypadInput) -> Vec<AppAction> {
        if self.screen != Screen::PinEntry {
            tracing::debug!("Ignoring keypad input {input:?} outside pin screen");
            return vec![];
        }

        match input {
            KeypadInput::Position(position) => self.press(position),
            KeypadInput::Backspace => self.backspace(),
            KeypadInput::Enter => self.submit(),
        }
    }

    fn press_digit(&mut self, digit: u8) -> Vec<AppAction> {
        match Digit::new(digit) {
            Ok(d) => self.press(GridPosition::for_digit(d).index()),
            Err(e) => {
                tracing::debug!("Ignoring key: {e}");
                vec![]
            },
        }
    }

    fn enter_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            tracing::info!("Screen {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
        self.shake_ticks = 0;
    }

    /// Replace the name field contents.
    pub fn set_name(&mut self, name: &str) -> Vec<AppAction> {
        self.name.set(name);
        vec![AppAction::Render]
    }

    /// Start a session for the current name.
    ///
    /// No-op unless on the name screen with start armed.
    pub fn start(&mut self) -> Vec<AppAction> {
        if self.screen != Screen::NameEntry {
            return vec![];
        }
        let Some(session) = Session::start(self.name.text(), &self.env) else {
            tracing::debug!("Start ignored: name is blank");
            return vec![];
        };

        tracing::info!("Session started for {:?}", session.name());
        self.session = Some(session);
        self.status_message = None;
        self.enter_screen(Screen::PinEntry);
        vec![AppAction::Render]
    }

    /// Press the keypad button at `position`.
    pub fn press(&mut self, position: u8) -> Vec<AppAction> {
        let changed = self.session.as_mut().is_some_and(|s| s.pin_mut().press(position));
        if changed { vec![AppAction::Render] } else { vec![] }
    }

    /// Remove the last entered digit.
    pub fn backspace(&mut self) -> Vec<AppAction> {
        let changed = self.session.as_mut().is_some_and(|s| s.pin_mut().backspace());
        if changed { vec![AppAction::Render] } else { vec![] }
    }

    /// Submit the entered code.
    ///
    /// A full buffer records the attempt and returns to the name screen. An
    /// incomplete one only triggers the shake cue.
    pub fn submit(&mut self) -> Vec<AppAction> {
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };

        match session.submit(self.env.wall_clock()) {
            Ok(attempt) => {
                tracing::info!(
                    "Attempt by {:?}: expected {}, entered {}",
                    attempt.participant_name,
                    attempt.generated_code,
                    attempt.entered_code
                );
                self.session = None;
                self.name.clear();
                self.enter_screen(Screen::NameEntry);
                vec![AppAction::RecordAttempt(attempt), AppAction::Render]
            },
            Err(PinError::Incomplete { entered, expected }) => {
                tracing::debug!("Submit rejected: {entered} of {expected} digits");
                self.shake_ticks = SHAKE_TICKS;
                vec![AppAction::Render]
            },
        }
    }

    /// Abandon the session and return to the name screen.
    ///
    /// The name stays in the field; nothing is recorded.
    pub fn back(&mut self) -> Vec<AppAction> {
        if self.screen != Screen::PinEntry {
            return vec![];
        }
        if let Some(session) = self.session.take() {
            tracing::info!("Session abandoned by {:?}", session.name());
        }
        self.enter_screen(Screen::NameEntry);
        vec![AppAction::Render]
    }

    /// Apply a navigation intent.
    ///
    /// `true` loads and shows results from any screen. `false` leaves the
    /// results screen for the name screen and is a no-op elsewhere.
    pub fn navigate(&mut self, results: bool) -> Vec<AppAction> {
        if results {
            return vec![AppAction::LoadResults];
        }
        if self.screen != Screen::Results {
            return vec![];
        }
        self.enter_screen(Screen::NameEntry);
        vec![AppAction::Render]
    }

    /// Force the results screen regardless of navigation state.
    pub fn show_admin_results(&mut self) -> Vec<AppAction> {
        tracing::info!("Operator requested results");
        vec![AppAction::LoadResults]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Active screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Running session. `None` outside the pin screen.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Name field.
    pub fn name_input(&self) -> &NameField {
        &self.name
    }

    /// Whether the start action is armed.
    pub fn start_enabled(&self) -> bool {
        !self.name.trimmed().is_empty()
    }

    /// Last results snapshot.
    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    /// Whether the shake cue is showing.
    pub fn is_shaking(&self) -> bool {
        self.shake_ticks > 0
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Environment used for code generation and timestamps.
    pub fn env(&self) -> &E {
        &self.env
    }
}
