//! Fixed-length numeric codes and the code generator.

use std::{fmt, str::FromStr};

use crate::{CodeError, Digit, Environment};

/// Number of digits in every code.
pub const PIN_LENGTH: usize = 4;

/// Digits a generated code may contain.
///
/// Mirrors the keypad region under study; the 0, 4, 5 and 6 buttons are never
/// a target. Participant input is not restricted to this set.
pub const CODE_ALPHABET: [u8; 6] = [1, 2, 3, 7, 8, 9];

/// Bytes at or above this bound are redrawn so `byte % 6` stays uniform.
const UNIFORM_BOUND: u8 = (u8::MAX / CODE_ALPHABET.len() as u8) * CODE_ALPHABET.len() as u8;

/// A code of exactly [`PIN_LENGTH`] digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinCode([Digit; PIN_LENGTH]);

impl PinCode {
    /// Create a code from its digits.
    pub const fn new(digits: [Digit; PIN_LENGTH]) -> Self {
        Self(digits)
    }

    /// Generate a target code.
    ///
    /// Each digit is sampled independently and uniformly, with replacement,
    /// from [`CODE_ALPHABET`].
    pub fn generate<E: Environment>(env: &E) -> Self {
        Self(std::array::from_fn(|_| {
            let byte = loop {
                let byte = env.random_u8();
                if byte < UNIFORM_BOUND {
                    break byte;
                }
            };
            Digit::from_alphabet(CODE_ALPHABET[(byte % CODE_ALPHABET.len() as u8) as usize])
        }))
    }

    /// Digits in entry order.
    pub fn digits(&self) -> &[Digit; PIN_LENGTH] {
        &self.0
    }

    /// Whether every digit is drawn from [`CODE_ALPHABET`].
    pub fn is_in_alphabet(&self) -> bool {
        self.0.iter().all(|d| CODE_ALPHABET.contains(&d.value()))
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl FromStr for PinCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.chars().map(Digit::from_char).collect::<Result<Vec<_>, _>>()?;
        let got = digits.len();
        let digits: [Digit; PIN_LENGTH] =
            digits.try_into().map_err(|_| CodeError::Length { expected: PIN_LENGTH, got })?;
        Ok(Self(digits))
    }
}
