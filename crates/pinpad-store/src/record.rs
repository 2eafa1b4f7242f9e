//! Persisted record layout.
//!
//! The log is one value under [`RESULTS_KEY`]: a JSON array of records
//!
//! ```json
//! [{"name":"Ann","generatedNumber":"1239","enteredNumber":"1239",
//!   "buttonPositions":[0,1,2,8],"timestamp":"2026-01-02T03:04:05.000Z"}]
//! ```
//!
//! Field names and encodings are fixed so existing logs stay readable.

use chrono::{DateTime, SecondsFormat, Utc};
use pinpad_core::{Attempt, CodeError, GridPosition, PIN_LENGTH, PinCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::StorageError;

/// Key holding the serialized log.
pub const RESULTS_KEY: &str = "pinPadResults";

/// Wire form of an [`Attempt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAttempt {
    /// Participant name.
    pub name: String,
    /// Target code as 4-digit text.
    pub generated_number: String,
    /// Entered code as 4-digit text.
    pub entered_number: String,
    /// Grid positions pressed (`0..=9`).
    pub button_positions: Vec<u8>,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub timestamp: String,
}

impl From<&Attempt> for StoredAttempt {
    fn from(attempt: &Attempt) -> Self {
        Self {
            name: attempt.participant_name.clone(),
            generated_number: attempt.generated_code.to_string(),
            entered_number: attempt.entered_code.to_string(),
            button_positions: attempt.keypad_positions.iter().map(|p| p.index()).collect(),
            timestamp: attempt.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl TryFrom<&StoredAttempt> for Attempt {
    type Error = StorageError;

    fn try_from(record: &StoredAttempt) -> Result<Self, Self::Error> {
        let generated_code: PinCode =
            record.generated_number.parse().map_err(|e| invalid_field("generatedNumber", &e))?;
        let entered_code: PinCode =
            record.entered_number.parse().map_err(|e| invalid_field("enteredNumber", &e))?;

        let positions = record
            .button_positions
            .iter()
            .map(|&p| GridPosition::new(p))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid_field("buttonPositions", &e))?;
        let got = positions.len();
        let keypad_positions: [GridPosition; PIN_LENGTH] = positions.try_into().map_err(|_| {
            invalid_field("buttonPositions", &CodeError::Length { expected: PIN_LENGTH, got })
        })?;

        let timestamp = DateTime::parse_from_rfc3339(&record.timestamp)
            .map_err(|e| StorageError::Corrupt(format!("invalid timestamp: {e}")))?
            .with_timezone(&Utc);

        Ok(Self {
            participant_name: record.name.clone(),
            generated_code,
            entered_code,
            keypad_positions,
            timestamp,
        })
    }
}

fn invalid_field(field: &str, err: &CodeError) -> StorageError {
    StorageError::Corrupt(format!("invalid {field}: {err}"))
}

/// Decode the stored value into attempts.
///
/// A missing value is an empty log. A value that is not a JSON array is
/// [`StorageError::Corrupt`]. Individual records that fail to parse or
/// validate are skipped with a warning.
pub fn decode_log(raw: Option<&[u8]>) -> Result<Vec<Attempt>, StorageError> {
    let Some(bytes) = raw else {
        return Ok(Vec::new());
    };

    let records = parse_array(bytes)?;

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match decode_record(value) {
            Ok(attempt) => Some(attempt),
            Err(e) => {
                tracing::warn!(index, "Skipping invalid result record: {e}");
                None
            },
        })
        .collect())
}

fn parse_array(bytes: &[u8]) -> Result<Vec<Value>, StorageError> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::Corrupt(e.to_string()))
}

fn decode_record(value: Value) -> Result<Attempt, StorageError> {
    let record: StoredAttempt =
        serde_json::from_value(value).map_err(|e| StorageError::Corrupt(e.to_string()))?;
    Attempt::try_from(&record)
}

/// Compute the stored value after appending `attempt` to `existing`.
///
/// Records already present are carried over verbatim, even ones that no
/// longer decode. A value that is not a JSON array is replaced by a fresh
/// array holding only the new attempt.
pub fn append_raw(existing: Option<&[u8]>, attempt: &Attempt) -> Result<Vec<u8>, StorageError> {
    let mut records = match existing {
        None => Vec::new(),
        Some(bytes) => parse_array(bytes).unwrap_or_else(|e| {
            tracing::warn!("Existing result log is corrupt, starting a fresh log: {e}");
            Vec::new()
        }),
    };

    let record = serde_json::to_value(StoredAttempt::from(attempt))
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    records.push(record);
    serde_json::to_vec(&records).map_err(|e| StorageError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pinpad_core::EnteredPin;

    use super::*;

    fn sample_attempt() -> Attempt {
        let entered = EnteredPin {
            code: "1237".parse().unwrap(),
            positions: [0, 1, 2, 6].map(|p| GridPosition::new(p).unwrap()),
        };
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        Attempt::new("Ann", "1239".parse().unwrap(), entered, ts)
    }

    #[test]
    fn wire_field_names() {
        let record = StoredAttempt::from(&sample_attempt());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ann",
                "generatedNumber": "1239",
                "enteredNumber": "1237",
                "buttonPositions": [0, 1, 2, 6],
                "timestamp": "2026-01-02T03:04:05.000Z",
            })
        );
    }

    #[test]
    fn reads_browser_style_records() {
        let raw = br#"[{"name":"Bo <b>","generatedNumber":"7777","enteredNumber":"7778",
            "buttonPositions":[6,6,6,7],"timestamp":"2025-11-30T23:59:59.999Z"}]"#;

        let attempts = decode_log(Some(raw)).unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].participant_name, "Bo <b>");
        assert_eq!(attempts[0].entered_code.to_string(), "7778");
        assert_eq!(attempts[0].timestamp.timestamp_subsec_millis(), 999);
    }

    #[test]
    fn missing_value_is_empty() {
        assert_eq!(decode_log(None), Ok(Vec::new()));
    }

    #[test]
    fn non_array_is_corrupt() {
        assert!(matches!(decode_log(Some(b"{not json")), Err(StorageError::Corrupt(_))));
        assert!(matches!(decode_log(Some(b"{\"a\":1}")), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn invalid_records_are_skipped() {
        let raw = br#"[
            {"name":"short","generatedNumber":"123","enteredNumber":"1234",
             "buttonPositions":[0,1,2,3],"timestamp":"2025-01-01T00:00:00.000Z"},
            {"name":"ok","generatedNumber":"1234","enteredNumber":"1234",
             "buttonPositions":[0,1,2,3],"timestamp":"2025-01-01T00:00:00.000Z"},
            {"name":"bad position","generatedNumber":"1234","enteredNumber":"1234",
             "buttonPositions":[0,1,2,11],"timestamp":"2025-01-01T00:00:00.000Z"}
        ]"#;

        let attempts = decode_log(Some(raw)).unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].participant_name, "ok");
    }

    #[test]
    fn append_over_corrupt_value_starts_fresh() {
        let raw = append_raw(Some(b"garbage"), &sample_attempt()).unwrap();
        let attempts = decode_log(Some(&raw)).unwrap();
        assert_eq!(attempts, vec![sample_attempt()]);
    }

    #[test]
    fn append_keeps_existing_records_verbatim() {
        // A record this build cannot validate must survive later appends
        let existing = br#"[{"name":"legacy","generatedNumber":"12","enteredNumber":"12",
            "buttonPositions":[0,1],"timestamp":"2025-01-01T00:00:00.000Z"}]"#;

        let raw = append_raw(Some(existing), &sample_attempt()).unwrap();
        let records: Vec<StoredAttempt> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "legacy");
    }

    const WRONG_TYPED: &[u8] = br#"[
        {"name":"Ann","generatedNumber":"1239","enteredNumber":"1239",
         "buttonPositions":[0,1,2,8],"timestamp":"2025-01-01T00:00:00.000Z"},
        {"name":"Bo","generatedNumber":"7777","enteredNumber":"7778",
         "buttonPositions":[6,6,6,7],"timestamp":"2025-01-01T00:00:01.000Z"},
        {"name":null,"generatedNumber":"1239","enteredNumber":"1239",
         "buttonPositions":[0,1,2,256],"timestamp":1700000000}
    ]"#;

    #[test]
    fn wrong_typed_record_is_skipped_on_read() {
        let attempts = decode_log(Some(WRONG_TYPED)).unwrap();
        let names: Vec<_> = attempts.iter().map(|a| a.participant_name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bo"]);
    }

    #[test]
    fn append_keeps_wrong_typed_records() {
        let raw = append_raw(Some(WRONG_TYPED), &sample_attempt()).unwrap();

        let values: Vec<Value> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values[2]["name"], Value::Null);
        assert_eq!(values[2]["timestamp"], serde_json::json!(1_700_000_000));

        let names: Vec<_> =
            decode_log(Some(&raw)).unwrap().into_iter().map(|a| a.participant_name).collect();
        assert_eq!(names, vec!["Ann", "Bo", "Ann"]);
    }
}
