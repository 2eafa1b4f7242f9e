//! Pin entry state machine.
//!
//! [`PinEntry`] buffers keypad presses until exactly [`PIN_LENGTH`] digits
//! are present. The buffer stores (position, digit) pairs, so the raw
//! positions and the entered digits can never drift out of step.
//!
//! # States
//!
//! ```text
//! Empty --press--> PartiallyFilled --press--> Full
//!   ^                  |      ^                 |
//!   +----backspace-----+      +---backspace-----+
//!
//! Full --submit--> Empty
//! ```
//!
//! Presses on a full buffer and backspace on an empty buffer are silent
//! no-ops; the keypad has no disabled-button feedback.

use crate::{Digit, GridPosition, PIN_LENGTH, PinCode, PinError};

/// Fill level of the pin buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinState {
    /// No digits buffered.
    Empty,
    /// Between one and `PIN_LENGTH - 1` digits buffered.
    PartiallyFilled,
    /// Exactly `PIN_LENGTH` digits buffered.
    Full,
}

/// A complete submission taken from the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnteredPin {
    /// Digits entered, in order.
    pub code: PinCode,
    /// Grid positions pressed, parallel to `code`.
    pub positions: [GridPosition; PIN_LENGTH],
}

/// Pin buffer driven by keypad presses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinEntry {
    keys: Vec<(GridPosition, Digit)>,
}

impl PinEntry {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { keys: Vec::with_capacity(PIN_LENGTH) }
    }

    /// Press the button at grid index `position`.
    ///
    /// Returns `true` if a digit was appended. Unmapped positions and presses
    /// on a full buffer are ignored.
    pub fn press(&mut self, position: u8) -> bool {
        match GridPosition::new(position) {
            Ok(position) => self.press_position(position),
            Err(e) => {
                tracing::debug!("ignoring keypad press: {e}");
                false
            },
        }
    }

    /// Press a validated grid position.
    pub fn press_position(&mut self, position: GridPosition) -> bool {
        if self.keys.len() >= PIN_LENGTH {
            return false;
        }

        self.keys.push((position, position.digit()));
        debug_assert!(self.keys.len() <= PIN_LENGTH);
        true
    }

    /// Remove the most recent press. Returns `true` if one was removed.
    pub fn backspace(&mut self) -> bool {
        self.keys.pop().is_some()
    }

    /// Take the buffer as a submission.
    ///
    /// On success the buffer is reset to [`PinState::Empty`]. On failure the
    /// buffer is left untouched.
    pub fn submit(&mut self) -> Result<EnteredPin, PinError> {
        let [k0, k1, k2, k3] = self.keys.as_slice() else {
            return Err(PinError::Incomplete { entered: self.keys.len(), expected: PIN_LENGTH });
        };

        let entered = EnteredPin {
            code: PinCode::new([k0.1, k1.1, k2.1, k3.1]),
            positions: [k0.0, k1.0, k2.0, k3.0],
        };
        self.reset();
        Ok(entered)
    }

    /// Clear the buffer unconditionally.
    pub fn reset(&mut self) {
        self.keys.clear();
    }

    /// Number of digits buffered.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Current fill level.
    pub fn state(&self) -> PinState {
        match self.keys.len() {
            0 => PinState::Empty,
            n if n < PIN_LENGTH => PinState::PartiallyFilled,
            _ => PinState::Full,
        }
    }

    /// Buffered digits, in entry order.
    pub fn digits(&self) -> Vec<Digit> {
        self.keys.iter().map(|&(_, digit)| digit).collect()
    }

    /// Buffered grid positions, in entry order.
    pub fn positions(&self) -> Vec<GridPosition> {
        self.keys.iter().map(|&(position, _)| position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(positions: &[u8]) -> PinEntry {
        let mut pin = PinEntry::new();
        for &p in positions {
            pin.press(p);
        }
        pin
    }

    fn digits_of(pin: &PinEntry) -> String {
        pin.digits().iter().map(|d| d.to_char()).collect()
    }

    #[test]
    fn states_follow_length() {
        let mut pin = PinEntry::new();
        assert_eq!(pin.state(), PinState::Empty);

        pin.press(0);
        assert_eq!(pin.state(), PinState::PartiallyFilled);

        pin.press(1);
        pin.press(2);
        assert_eq!(pin.state(), PinState::PartiallyFilled);

        pin.press(8);
        assert_eq!(pin.state(), PinState::Full);
    }

    #[test]
    fn press_when_full_is_ignored() {
        let mut pin = pressed(&[0, 1, 2, 8]);
        assert!(!pin.press(3));
        assert_eq!(pin.len(), 4);
        assert_eq!(digits_of(&pin), "1239");
    }

    #[test]
    fn unmapped_position_is_ignored() {
        let mut pin = pressed(&[0]);
        assert!(!pin.press(10));
        assert!(!pin.press(255));
        assert_eq!(pin.len(), 1);
    }

    #[test]
    fn any_key_accepted_regardless_of_alphabet() {
        // 4, 5, 6 and 0 are never generated but may still be typed
        let pin = pressed(&[3, 4, 5, 9]);
        assert_eq!(digits_of(&pin), "4560");
    }

    #[test]
    fn backspace_removes_most_recent() {
        let mut pin = pressed(&[0, 1, 2, 8]);
        assert!(pin.backspace());
        assert_eq!(digits_of(&pin), "123");
        assert_eq!(pin.positions().iter().map(|p| p.index()).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn backspace_on_empty_is_ignored() {
        let mut pin = PinEntry::new();
        assert!(!pin.backspace());
        assert!(pin.is_empty());
    }

    #[test]
    fn incomplete_submit_keeps_buffer() {
        let mut pin = pressed(&[0, 1, 2]);
        assert_eq!(pin.submit(), Err(PinError::Incomplete { entered: 3, expected: 4 }));
        assert_eq!(digits_of(&pin), "123");

        let mut empty = PinEntry::new();
        assert_eq!(empty.submit(), Err(PinError::Incomplete { entered: 0, expected: 4 }));
    }

    #[test]
    fn full_submit_returns_entry_and_resets() {
        let mut pin = pressed(&[0, 1, 2, 8]);
        let entered = pin.submit().unwrap();

        assert_eq!(entered.code.to_string(), "1239");
        assert_eq!(entered.positions.map(GridPosition::index), [0, 1, 2, 8]);
        assert_eq!(pin.state(), PinState::Empty);
    }

    #[test]
    fn correction_replaces_last_digit() {
        let mut pin = pressed(&[0, 1, 2, 8]);
        pin.backspace();
        pin.press(6);

        let entered = pin.submit().unwrap();
        assert_eq!(entered.code.to_string(), "1237");
        assert_eq!(entered.positions.map(GridPosition::index), [0, 1, 2, 6]);
    }

    #[test]
    fn reset_clears_partial_input() {
        let mut pin = pressed(&[0, 1]);
        pin.reset();
        assert!(pin.is_empty());
    }
}
