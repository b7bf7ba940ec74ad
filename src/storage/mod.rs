//! Entry storage.
//!
//! The codec never touches storage directly; decoded entries reach a store
//! only through [`PendingImport::confirm`](crate::io::PendingImport::confirm).

mod json_file;

pub use json_file::{JOURNAL_FILE_NAME, JsonFileStore};

use crate::Result;
use crate::models::{EntryId, JournalEntry};

/// Persistent collection of journal entries.
pub trait EntryStore {
    /// Returns every stored entry in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn list(&self) -> Result<Vec<JournalEntry>>;

    /// Appends entries, returning how many were added.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn insert_all(&mut self, entries: Vec<JournalEntry>) -> Result<usize>;

    /// Appends a single entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn insert(&mut self, entry: JournalEntry) -> Result<()> {
        self.insert_all(vec![entry]).map(|_| ())
    }

    /// Looks up an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, id: &EntryId) -> Result<Option<JournalEntry>> {
        Ok(self.list()?.into_iter().find(|e| &e.id == id))
    }

    /// Returns the number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }
}

/// In-memory store, used for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<JournalEntry>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl EntryStore for MemoryStore {
    fn list(&self) -> Result<Vec<JournalEntry>> {
        Ok(self.entries.clone())
    }

    fn insert_all(&mut self, entries: Vec<JournalEntry>) -> Result<usize> {
        let added = entries.len();
        self.entries.extend(entries);
        Ok(added)
    }
}
