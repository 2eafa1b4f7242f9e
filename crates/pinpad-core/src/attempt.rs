//! Attempt record.

use chrono::{DateTime, SubsecRound, Utc};

use crate::{EnteredPin, GridPosition, PIN_LENGTH, PinCode};

/// One completed participant interaction.
///
/// Constructed only on a successful submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Participant name, trimmed and non-empty.
    pub participant_name: String,
    /// Target code shown to the participant.
    pub generated_code: PinCode,
    /// Code the participant typed.
    pub entered_code: PinCode,
    /// Grid positions pressed, parallel to `entered_code`.
    pub keypad_positions: [GridPosition; PIN_LENGTH],
    /// When the attempt was recorded (millisecond precision).
    pub timestamp: DateTime<Utc>,
}

impl Attempt {
    /// Build an attempt from a finished submission.
    ///
    /// The timestamp is truncated to milliseconds, the precision of the
    /// persisted format.
    pub fn new(
        participant_name: impl Into<String>,
        generated_code: PinCode,
        entered: EnteredPin,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            participant_name: participant_name.into(),
            generated_code,
            entered_code: entered.code,
            keypad_positions: entered.positions,
            timestamp: timestamp.trunc_subsecs(3),
        }
    }

    /// Whether the entered code equals the generated code.
    pub fn is_match(&self) -> bool {
        self.generated_code == self.entered_code
    }
}
