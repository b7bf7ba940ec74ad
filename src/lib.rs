//! # Session Journal
//!
//! A personal session journal with a portable, spreadsheet-safe CSV
//! interchange format.
//!
//! The heart of the crate is the CSV codec in [`io`]: an encoder that writes
//! journal entries under a fixed eight-column header, and a decoder that
//! restores them, failing deterministically on any structural or semantic
//! defect. Around it sit a small file-backed entry store, configuration,
//! logging, and the `session-journal` command-line tool.
//!
//! ## Example
//!
//! ```rust,ignore
//! use session_journal::io::{ExportOptions, ExportService, ImportService};
//!
//! let bytes = ExportService::encode(&entries, &ExportOptions::default());
//! let restored = ImportService::decode(&bytes)?;
//! assert_eq!(restored.len(), entries.len());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod storage;

// Re-exports for convenience
pub use config::JournalConfig;
pub use io::{ExportOptions, ExportService, ImportService, PendingImport};
pub use models::{
    AdministrationMethod, EntryId, JournalEntry, MusicLink, MusicProvider, TreatmentType,
};
pub use storage::{EntryStore, JsonFileStore, MemoryStore};

/// Failure while decoding a journal CSV file.
///
/// The set is closed. Every variant is fatal to the whole import: no entries
/// are returned when any row is rejected.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidHeader` | First line is not the canonical header, byte for byte |
/// | `InvalidRow` | A data row has bad quoting, wrong field count, or a field fails validation |
/// | `ParseFailure` | The buffer cannot be read as text at all |
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ImportError {
    /// The header line does not match the journal format.
    #[error("the file header does not match the journal export format")]
    InvalidHeader,

    /// The data row at this 1-based index is malformed or invalid.
    #[error("row {0} is not a valid journal entry")]
    InvalidRow(usize),

    /// The buffer could not be parsed before row processing began.
    #[error("could not parse file: {0}")]
    ParseFailure(String),
}

/// Error type for journal operations.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Bad CLI arguments, unknown vocabulary names, malformed config values |
/// | `OperationFailed` | File I/O, store serialization, logging initialization |
/// | `Import` | The CSV decoder rejected the input |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A CSV import was rejected.
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Result type alias for journal operations.
pub type Result<T> = std::result::Result<T, Error>;
