//! Redb-backed durable result log.
//!
//! Uses Redb's ACID transactions with Copy-on-Write for crash safety. Every
//! append is a single write transaction, so entries committed before a crash
//! or restart are never lost.

use std::{path::Path, sync::Arc};

use pinpad_core::Attempt;
use redb::{Database, ReadableTable, TableDefinition};

use super::{RESULTS_KEY, ResultLog, StorageError, append_raw, decode_log};

/// Table: kv
/// Key: storage key (only [`RESULTS_KEY`] is used)
/// Value: JSON array of stored attempt records
const KV: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// Durable result log backed by Redb.
///
/// Thread-safe through Redb's internal locking; write transactions are
/// serialized, giving a single writer. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbLog {
    db: Arc<Database>,
}

impl RedbLog {
    /// Open or create a Redb database at the given path.
    ///
    /// Creates the KV table if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db = Database::create(path.as_ref()).map_err(|e| StorageError::Io(e.to_string()))?;

        let txn = db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;
        {
            let _ = txn.open_table(KV).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Copy of the raw stored value. `None` if nothing was ever written.
    pub fn raw(&self) -> Result<Option<Vec<u8>>, StorageError> {
        let txn = self.db.begin_read().map_err(|e| StorageError::Io(e.to_string()))?;
        let table = txn.open_table(KV).map_err(|e| StorageError::Io(e.to_string()))?;

        let value = table.get(RESULTS_KEY).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(value.map(|guard| guard.value().to_vec()))
    }

    /// Overwrite the raw stored value.
    ///
    /// Administrative escape hatch (imports, fault injection in tests); the
    /// kiosk itself only ever appends.
    pub fn write_raw(&self, raw: &[u8]) -> Result<(), StorageError> {
        let txn = self.db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;
        {
            let mut table = txn.open_table(KV).map_err(|e| StorageError::Io(e.to_string()))?;
            table.insert(RESULTS_KEY, raw).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(())
    }
}

impl ResultLog for RedbLog {
    fn append(&self, attempt: &Attempt) -> Result<(), StorageError> {
        let txn = self.db.begin_write().map_err(|e| StorageError::Io(e.to_string()))?;

        {
            let mut table = txn.open_table(KV).map_err(|e| StorageError::Io(e.to_string()))?;

            let existing = table
                .get(RESULTS_KEY)
                .map_err(|e| StorageError::Io(e.to_string()))?
                .map(|guard| guard.value().to_vec());

            let updated = append_raw(existing.as_deref(), attempt)?;
            table
                .insert(RESULTS_KEY, updated.as_slice())
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }

        txn.commit().map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::debug!("Appended attempt for {}", attempt.participant_name);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Attempt>, StorageError> {
        let raw = self.raw()?;
        decode_log(raw.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pinpad_core::{EnteredPin, GridPosition, PinCode};
    use tempfile::tempdir;

    use super::*;

    fn attempt(name: &str, generated: &str, positions: [u8; 4], secs: i64) -> Attempt {
        let positions = positions.map(|p| GridPosition::new(p).unwrap());
        let code = PinCode::new(positions.map(GridPosition::digit));
        let ts = Utc.timestamp_opt(1_767_225_600 + secs, 250_000_000).unwrap();
        Attempt::new(name, generated.parse().unwrap(), EnteredPin { code, positions }, ts)
    }

    #[test]
    fn test_open_creates_empty_log() {
        let dir = tempdir().unwrap();
        let log = RedbLog::open(dir.path().join("results.redb")).unwrap();

        assert_eq!(log.list_all().unwrap(), Vec::new());
        assert_eq!(log.raw().unwrap(), None);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let log = RedbLog::open(dir.path().join("results.redb")).unwrap();

        let first = attempt("Ann", "1239", [0, 1, 2, 8], 0);
        let second = attempt("Bo", "1239", [0, 1, 2, 6], 1);
        log.append(&first).unwrap();
        log.append(&second).unwrap();

        assert_eq!(log.list_all().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.redb");
        let written = attempt("Ann", "1239", [0, 1, 2, 8], 0);

        {
            let log = RedbLog::open(&path).unwrap();
            log.append(&written).unwrap();
        }

        let reopened = RedbLog::open(&path).unwrap();
        assert_eq!(reopened.list_all().unwrap(), vec![written]);
    }

    #[test]
    fn test_stored_value_is_json_array() {
        let dir = tempdir().unwrap();
        let log = RedbLog::open(dir.path().join("results.redb")).unwrap();
        log.append(&attempt("Ann", "1239", [0, 1, 2, 8], 0)).unwrap();

        let raw = log.raw().unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value[0]["enteredNumber"], "1239");
        assert_eq!(value[0]["buttonPositions"], serde_json::json!([0, 1, 2, 8]));
        assert_eq!(value[0]["timestamp"], "2026-01-01T00:00:00.250Z");
    }

    #[test]
    fn test_corrupt_value() {
        let dir = tempdir().unwrap();
        let log = RedbLog::open(dir.path().join("results.redb")).unwrap();
        log.write_raw(b"\xff\xfe").unwrap();

        assert!(matches!(log.list_all(), Err(StorageError::Corrupt(_))));
        assert!(crate::load_or_empty(&log).is_empty());

        // Next append starts a fresh log
        log.append(&attempt("Ann", "1239", [0, 1, 2, 8], 0)).unwrap();
        assert_eq!(log.list_all().unwrap().len(), 1);
    }
}
