//! Keypad layout.
//!
//! A grid position identifies a physical button independent of the digit it
//! displays. The layout is phone style:
//!
//! ```text
//! position      digit
//!  0 1 2        1 2 3
//!  3 4 5        4 5 6
//!  6 7 8        7 8 9
//!    9            0
//! ```

use std::fmt;

use crate::CodeError;

/// Number of buttons on the keypad.
pub const GRID_SIZE: usize = 10;

/// Digit displayed at each grid position.
const LAYOUT: [u8; GRID_SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0];

/// A single decimal digit (`0..=9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    /// Create a digit, rejecting values above 9.
    pub fn new(value: u8) -> Result<Self, CodeError> {
        if value <= 9 { Ok(Self(value)) } else { Err(CodeError::DigitOutOfRange(value)) }
    }

    /// Wrap a value taken from a table of known decimal digits.
    pub(crate) const fn from_alphabet(value: u8) -> Self {
        debug_assert!(value <= 9);
        Self(value)
    }

    /// Parse an ASCII digit character.
    pub fn from_char(c: char) -> Result<Self, CodeError> {
        c.to_digit(10).map(|d| Self(d as u8)).ok_or(CodeError::NotADigit(c))
    }

    /// Numeric value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// ASCII character for this digit.
    pub fn to_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a keypad button (`0..GRID_SIZE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition(u8);

impl GridPosition {
    /// Create a position, rejecting indices outside the grid.
    pub fn new(index: u8) -> Result<Self, CodeError> {
        if (index as usize) < GRID_SIZE {
            Ok(Self(index))
        } else {
            Err(CodeError::PositionOutOfRange(index))
        }
    }

    /// Position of the button that displays `digit`.
    pub fn for_digit(digit: Digit) -> Self {
        match digit.value() {
            0 => Self(9),
            d => Self(d - 1),
        }
    }

    /// Raw grid index.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Digit displayed on this button.
    pub fn digit(self) -> Digit {
        Digit(LAYOUT[self.0 as usize])
    }

    /// All positions in grid order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..GRID_SIZE as u8).map(Self)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
