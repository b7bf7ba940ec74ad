//! Format adapters for import/export.
//!
//! The journal has a single interchange format: the fixed-layout CSV in
//! [`csv`].

pub mod csv;

use std::path::Path;

/// File extension of exported journals.
pub const CSV_EXTENSION: &str = "csv";

/// Returns whether `path` carries the journal file extension (any case).
#[must_use]
pub fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(CSV_EXTENSION))
}
