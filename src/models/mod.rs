//! Data models for the journal.
//!
//! Entries plus the closed vocabularies they draw from.

mod entry;
mod vocabulary;

pub use entry::{EntryId, JournalEntry, MusicLink};
pub use vocabulary::{AdministrationMethod, MusicProvider, TreatmentType};
