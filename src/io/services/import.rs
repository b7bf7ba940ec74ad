//! Journal import service.
//!
//! Decodes CSV exports back into entries. Decoding is all-or-nothing: the
//! first rejected row aborts the whole import with that row's index, and no
//! partial result is returned.

use crate::io::formats::csv::CsvImportSource;
use crate::models::JournalEntry;
use crate::storage::EntryStore;
use crate::{Error, ImportError, Result};
use std::path::{Path, PathBuf};

/// Decoded entries awaiting explicit confirmation.
///
/// Nothing reaches the store until [`confirm`](Self::confirm) is called.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending import does nothing until confirmed"]
pub struct PendingImport {
    entries: Vec<JournalEntry>,
    source: Option<PathBuf>,
}

impl PendingImport {
    /// Wraps decoded entries.
    pub const fn new(entries: Vec<JournalEntry>) -> Self {
        Self {
            entries,
            source: None,
        }
    }

    /// Records the file the entries came from.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Returns the staged entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Returns the originating file, if known.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the number of staged entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing was staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges the staged entries into `store`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the insert fails.
    pub fn confirm(self, store: &mut dyn EntryStore) -> Result<usize> {
        let inserted = store.insert_all(self.entries)?;
        tracing::info!(inserted, source = ?self.source, "Confirmed journal import");
        Ok(inserted)
    }

    /// Drops the staged entries without touching any store.
    pub fn discard(self) {
        tracing::debug!(discarded = self.entries.len(), "Discarded pending import");
    }
}

/// Service for importing journal entries from CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportService;

impl ImportService {
    /// Decodes a CSV byte buffer.
    ///
    /// Empty input and header-only input decode to an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::ParseFailure`] for non-UTF-8 input,
    /// [`ImportError::InvalidHeader`] for a header mismatch, and
    /// [`ImportError::InvalidRow`] with the 1-based index of the first bad row.
    pub fn decode(bytes: &[u8]) -> std::result::Result<Vec<JournalEntry>, ImportError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            tracing::debug!(valid_up_to = e.valid_up_to(), "Import buffer is not UTF-8");
            record_failure(ImportError::ParseFailure(
                "file is not valid UTF-8 text".to_string(),
            ))
        })?;
        Self::decode_str(text)
    }

    /// Decodes CSV text.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode), minus the UTF-8 check.
    pub fn decode_str(text: &str) -> std::result::Result<Vec<JournalEntry>, ImportError> {
        let source = CsvImportSource::new(text).map_err(record_failure)?;
        let rows = source.row_count();
        let entries = source
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(record_failure)?;

        metrics::counter!("journal_csv_rows_imported_total").increment(entries.len() as u64);
        tracing::debug!(rows, decoded = entries.len(), "Decoded journal CSV");
        Ok(entries)
    }

    /// Decodes a buffer into a pending import.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn stage(bytes: &[u8]) -> std::result::Result<PendingImport, ImportError> {
        Self::decode(bytes).map(PendingImport::new)
    }

    /// Reads and decodes a file into a pending import.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the file cannot be read and
    /// [`Error::Import`] if decoding fails.
    pub fn import_from_file(path: &Path) -> Result<PendingImport> {
        let bytes = std::fs::read(path).map_err(|e| Error::OperationFailed {
            operation: "open_import_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        let pending = Self::stage(&bytes)?.with_source(path);
        tracing::info!(path = %path.display(), staged = pending.len(), "Staged journal import");
        Ok(pending)
    }
}

fn record_failure(err: ImportError) -> ImportError {
    let kind = match &err {
        ImportError::InvalidHeader => "invalid_header",
        ImportError::InvalidRow(_) => "invalid_row",
        ImportError::ParseFailure(_) => "parse_failure",
    };
    metrics::counter!("journal_csv_import_failures_total", "kind" => kind).increment(1);
    tracing::warn!(error = %err, "Journal import rejected");
    err
}
