//! Kiosk configuration.
//!
//! Command-line arguments are folded into a [`KioskConfig`]; anything not
//! given falls back to the platform data directory.

use std::{
    io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;

/// Database file name inside the data directory.
const DB_FILE: &str = "pinpad.redb";

/// Log file name inside the data directory.
const LOG_FILE: &str = "pinpad.log";

/// Runtime configuration for the kiosk binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskConfig {
    /// redb database holding the result log.
    pub db_path: PathBuf,
    /// File receiving tracing output.
    pub log_file: PathBuf,
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Open on the results screen instead of the name screen.
    pub show_results: bool,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self::in_dir(&data_dir())
    }
}

impl KioskConfig {
    /// Configuration keeping the database and log under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DB_FILE),
            log_file: dir.join(LOG_FILE),
            log_level: "info".to_string(),
            show_results: false,
        }
    }

    /// Create the parent directories of the database and log file.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        for path in [&self.db_path, &self.log_file] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Platform data directory, or the working directory if none exists.
fn data_dir() -> PathBuf {
    ProjectDirs::from("dev", "pinpad", "pinpad")
        .map_or_else(|| PathBuf::from("."), |d| d.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_dir_places_files_together() {
        let config = KioskConfig::in_dir(Path::new("/tmp/kiosk"));
        assert_eq!(config.db_path, Path::new("/tmp/kiosk/pinpad.redb"));
        assert_eq!(config.log_file, Path::new("/tmp/kiosk/pinpad.log"));
        assert_eq!(config.log_level, "info");
        assert!(!config.show_results);
    }

    #[test]
    fn ensure_dirs_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let config = KioskConfig::in_dir(&dir.path().join("a/b"));

        config.ensure_dirs().unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn bare_file_names_need_no_dirs() {
        let config = KioskConfig {
            db_path: PathBuf::from("results.redb"),
            log_file: PathBuf::from("kiosk.log"),
            ..KioskConfig::in_dir(Path::new("."))
        };
        config.ensure_dirs().unwrap();
    }
}
