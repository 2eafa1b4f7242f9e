//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: screen controller
//! - [`ResultLog`]: append-only attempt storage
//! - [`Driver`]: platform-specific I/O

use pinpad_core::Environment;
use pinpad_store::{ResultLog, load_or_empty};

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that orchestrates App, result log, and Driver.
///
/// The runtime is the only writer of the log, so all log access is
/// serialized through it.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `L`: Result log backend
/// - `E`: Environment for randomness and time
pub struct Runtime<D, L, E>
where
    D: Driver,
    L: ResultLog,
    E: Environment,
{
    driver: D,
    log: L,
    app: App<E>,
}

impl<D, L, E> Runtime<D, L, E>
where
    D: Driver,
    L: ResultLog,
    E: Environment,
{
    /// Create a new runtime with the given driver, log, and environment.
    pub fn new(driver: D, log: L, env: E) -> Self {
        Self { driver, log, app: App::new(env) }
    }

    /// Run the main event loop until the App asks to quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        loop {
            if self.step().await? {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Poll one event from the driver and process it.
    ///
    /// Returns `true` if the application should quit.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        match self.driver.poll_event().await? {
            Some(event) => self.dispatch(event),
            None => Ok(false),
        }
    }

    /// Feed an event to the App and execute the resulting actions.
    ///
    /// Returns `true` if the application should quit.
    pub fn dispatch(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let actions = self.app.handle(event);
        self.process_actions(actions)
    }

    /// Process actions returned by the App.
    ///
    /// Log actions feed their outcome back into the App, whose actions are
    /// processed in turn. Returns `true` if should quit.
    fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::RecordAttempt(attempt) => match self.log.append(&attempt) {
                        Ok(()) => {
                            tracing::info!(
                                "Recorded attempt by {:?} (match: {})",
                                attempt.participant_name,
                                attempt.is_match()
                            );
                        },
                        Err(e) => {
                            tracing::warn!("Failed to record attempt: {e}");
                            let event = AppEvent::StorageFailed { message: e.to_string() };
                            pending_actions.extend(self.app.handle(event));
                        },
                    },
                    AppAction::LoadResults => {
                        let attempts = load_or_empty(&self.log);
                        pending_actions.extend(self.app.handle(AppEvent::ResultsLoaded(attempts)));
                    },
                }
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App<E> {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App<E> {
        &mut self.app
    }

    /// Get a reference to the result log
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
