//! Observable application state types.
//!
//! This module defines the data structures that represent the kiosk's
//! current view of the world: the active [`Screen`], the name being typed
//! ([`NameField`]), and the participant [`Session`] in progress.

use chrono::{DateTime, Utc};
use pinpad_core::{Attempt, Environment, PinCode, PinEntry, PinError};

/// Screen currently shown. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Participant types their name.
    #[default]
    NameEntry,
    /// Participant re-enters the shown code on the keypad.
    PinEntry,
    /// Tabular listing of recorded attempts.
    Results,
}

/// Single-line text field for the participant name.
///
/// The cursor is a character index, so multi-byte names edit correctly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameField {
    buffer: String,
    cursor: usize,
}

impl NameField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw field contents.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Contents with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.buffer.trim()
    }

    /// Replace the contents and move the cursor to the end.
    pub fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.chars().count();
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, c);
        self.cursor = self.cursor.saturating_add(1);
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.cursor.saturating_sub(1);
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Move the cursor one character left.
    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right.
    pub fn right(&mut self) {
        if self.cursor < self.len() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Move the cursor to the start.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    /// Empty the field.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer.char_indices().nth(char_index).map_or(self.buffer.len(), |(i, _)| i)
    }
}

/// One participant's interaction.
///
/// Created on start, consumed on submit or back. Owns the pin buffer, so a
/// new session can never see a previous participant's partial input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    name: String,
    code: PinCode,
    pin: PinEntry,
}

impl Session {
    /// Start a session for `raw_name`, generating a fresh target code.
    ///
    /// Returns `None` if the trimmed name is empty.
    pub fn start<E: Environment>(raw_name: &str, env: &E) -> Option<Self> {
        let name = raw_name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self { name: name.to_string(), code: PinCode::generate(env), pin: PinEntry::new() })
    }

    /// Trimmed participant name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target code, shown to the participant during entry.
    pub fn code(&self) -> PinCode {
        self.code
    }

    /// Pin buffer.
    pub fn pin(&self) -> &PinEntry {
        &self.pin
    }

    /// Mutable pin buffer for press and backspace.
    pub fn pin_mut(&mut self) -> &mut PinEntry {
        &mut self.pin
    }

    /// Submit the pin buffer, producing the attempt to record.
    ///
    /// Fails with [`PinError::Incomplete`] (buffer untouched) unless the
    /// buffer is full.
    pub fn submit(&mut self, timestamp: DateTime<Utc>) -> Result<Attempt, PinError> {
        let entered = self.pin.submit()?;
        Ok(Attempt::new(self.name.clone(), self.code, entered, timestamp))
    }
}
