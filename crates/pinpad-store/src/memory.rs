//! In-memory result log.

use std::sync::{Arc, Mutex, MutexGuard};

use pinpad_core::Attempt;

use super::{ResultLog, StorageError, append_raw, decode_log};

/// In-memory result log for testing and simulation
///
/// Holds the same serialized value a durable backend would store under
/// [`crate::RESULTS_KEY`], so encoding, corruption handling and ordering
/// behave identically. Clones share the value through `Arc<Mutex<_>>`.
#[derive(Clone, Default)]
pub struct MemoryLog {
    value: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log whose stored value is `raw`, verbatim.
    ///
    /// Useful for exercising corrupt or legacy data.
    pub fn with_raw(raw: impl Into<Vec<u8>>) -> Self {
        Self { value: Arc::new(Mutex::new(Some(raw.into()))) }
    }

    /// Copy of the stored value. `None` if nothing was ever written.
    pub fn raw(&self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Vec<u8>>>, StorageError> {
        self.value.lock().map_err(|_| StorageError::Io("result log mutex poisoned".into()))
    }
}

impl ResultLog for MemoryLog {
    fn append(&self, attempt: &Attempt) -> Result<(), StorageError> {
        let mut value = self.lock()?;
        let updated = append_raw(value.as_deref(), attempt)?;
        *value = Some(updated);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Attempt>, StorageError> {
        let value = self.lock()?;
        decode_log(value.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pinpad_core::{EnteredPin, GridPosition};

    use super::*;
    use crate::load_or_empty;

    fn attempt(name: &str, entered: &str) -> Attempt {
        let code: pinpad_core::PinCode = entered.parse().unwrap();
        let positions = code.digits().map(GridPosition::for_digit);
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        Attempt::new(name, "1239".parse().unwrap(), EnteredPin { code, positions }, ts)
    }

    #[test]
    fn empty_log_lists_nothing() {
        let log = MemoryLog::new();
        assert_eq!(log.list_all(), Ok(Vec::new()));
        assert_eq!(log.raw(), Ok(None));
    }

    #[test]
    fn append_preserves_insertion_order() {
        let log = MemoryLog::new();
        log.append(&attempt("Ann", "1239")).unwrap();
        log.append(&attempt("Bo", "1237")).unwrap();
        log.append(&attempt("Cy", "9999")).unwrap();

        let names: Vec<_> =
            log.list_all().unwrap().into_iter().map(|a| a.participant_name).collect();
        assert_eq!(names, vec!["Ann", "Bo", "Cy"]);
    }

    #[test]
    fn clones_share_state() {
        let log = MemoryLog::new();
        let other = log.clone();
        log.append(&attempt("Ann", "1239")).unwrap();

        assert_eq!(other.list_all().unwrap().len(), 1);
    }

    #[test]
    fn list_is_idempotent() {
        let log = MemoryLog::new();
        log.append(&attempt("Ann", "1239")).unwrap();

        assert_eq!(log.list_all(), log.list_all());
    }

    #[test]
    fn corrupt_value_reads_as_empty() {
        let log = MemoryLog::with_raw("not json");
        assert!(matches!(log.list_all(), Err(StorageError::Corrupt(_))));
        assert!(load_or_empty(&log).is_empty());
    }

    #[test]
    fn wrong_typed_record_keeps_history() {
        let log = MemoryLog::with_raw(
            r#"[{"name":"Ann","generatedNumber":"1239","enteredNumber":"1239","buttonPositions":[0,1,2,8],"timestamp":"2026-03-01T12:00:00.000Z"},
               {"name":"Bo","generatedNumber":"1239","enteredNumber":"1237","buttonPositions":[0,1,2,6],"timestamp":"2026-03-01T12:00:01.000Z"},
               {"name":null,"generatedNumber":"1239","enteredNumber":"1239","buttonPositions":[0,1,2,8],"timestamp":"2026-03-01T12:00:02.000Z"}]"#,
        );
        assert_eq!(log.list_all().unwrap().len(), 2);
        assert_eq!(load_or_empty(&log).len(), 2);

        log.append(&attempt("New", "7777")).unwrap();

        let raw = log.raw().unwrap().unwrap();
        let records: Vec<serde_json::Value> = serde_json::from_slice(&raw).unwrap();
        assert_eq!(records.len(), 4);
        let names: Vec<_> =
            log.list_all().unwrap().into_iter().map(|a| a.participant_name).collect();
        assert_eq!(names, vec!["Ann", "Bo", "New"]);
    }
}
