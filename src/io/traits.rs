//! Core traits for export operations.

use crate::Result;
use crate::models::JournalEntry;

/// Sink for exported entries.
///
/// # Lifecycle
///
/// 1. Create sink with output destination
/// 2. Call `write()` for each entry, in the order they should appear
/// 3. Call `finalize()` to complete the export
pub trait ExportSink {
    /// Writes a single entry to the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn write(&mut self, entry: &JournalEntry) -> Result<()>;

    /// Finalizes the export, writing anything still pending and flushing.
    ///
    /// This method consumes the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if I/O fails.
    fn finalize(self: Box<Self>) -> Result<()>;
}
