//! JSON file entry store.
//!
//! Keeps the whole journal in one pretty-printed JSON array. Writes go to a
//! sibling temporary file first and are renamed into place.

use super::EntryStore;
use crate::models::JournalEntry;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name used inside the data directory.
pub const JOURNAL_FILE_NAME: &str = "journal.json";

/// Maximum journal file size (64MB).
const MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Entry store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at an explicit file path. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store for the journal file inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(JOURNAL_FILE_NAME))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_entries(&self, entries: &[JournalEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_data_dir".to_string(),
                cause: format!("{}: {e}", parent.display()),
            })?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(|e| Error::OperationFailed {
            operation: "serialize_journal".to_string(),
            cause: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| Error::OperationFailed {
            operation: "write_journal_file".to_string(),
            cause: format!("{}: {e}", tmp.display()),
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::OperationFailed {
            operation: "replace_journal_file".to_string(),
            cause: format!("{}: {e}", self.path.display()),
        })
    }
}

impl EntryStore for JsonFileStore {
    fn list(&self) -> Result<Vec<JournalEntry>> {
        let metadata = match fs::metadata(&self.path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::OperationFailed {
                    operation: "stat_journal_file".to_string(),
                    cause: format!("{}: {e}", self.path.display()),
                });
            },
        };
        if metadata.len() > MAX_FILE_SIZE {
            return Err(Error::OperationFailed {
                operation: "read_journal_file".to_string(),
                cause: format!(
                    "journal file exceeds maximum size of {MAX_FILE_SIZE} bytes: {}",
                    self.path.display()
                ),
            });
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| Error::OperationFailed {
            operation: "read_journal_file".to_string(),
            cause: format!("{}: {e}", self.path.display()),
        })?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| Error::OperationFailed {
            operation: "parse_journal_file".to_string(),
            cause: e.to_string(),
        })
    }

    fn insert_all(&mut self, entries: Vec<JournalEntry>) -> Result<usize> {
        let added = entries.len();
        if added == 0 {
            return Ok(0);
        }
        let mut all = self.list()?;
        all.extend(entries);
        self.write_entries(&all)?;
        tracing::debug!(path = %self.path.display(), added, total = all.len(), "Saved journal");
        Ok(added)
    }
}
