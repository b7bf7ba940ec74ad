//! Journal entry types and identifiers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{AdministrationMethod, MusicProvider, TreatmentType};

/// Unique identifier for a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Creates an entry ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A music link attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicLink {
    /// The link as stored (normalized on import).
    pub url: String,
    /// Provider classification derived from `url`.
    pub provider: MusicProvider,
}

/// A single journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Store identity. Not part of the interchange format.
    pub id: EntryId,
    /// Wall-clock start of the session.
    pub session_timestamp: NaiveDateTime,
    /// What was taken.
    pub treatment_type: TreatmentType,
    /// How it was taken.
    pub administration_method: AdministrationMethod,
    /// Free-text intention set before the session.
    pub intention: String,
    /// Self-reported mood before the session. Not range-checked here.
    pub mood_before: i64,
    /// Self-reported mood after the session. Not range-checked here.
    pub mood_after: i64,
    /// Free-text reflections written afterwards.
    pub reflections: String,
    /// Optional music link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_link: Option<MusicLink>,
}

impl JournalEntry {
    /// Creates an entry with empty text fields and neutral moods.
    #[must_use]
    pub fn new(
        session_timestamp: NaiveDateTime,
        treatment_type: TreatmentType,
        administration_method: AdministrationMethod,
    ) -> Self {
        Self {
            id: EntryId::generate(),
            session_timestamp,
            treatment_type,
            administration_method,
            intention: String::new(),
            mood_before: 5,
            mood_after: 5,
            reflections: String::new(),
            music_link: None,
        }
    }

    /// Sets the intention.
    #[must_use]
    pub fn with_intention(mut self, intention: impl Into<String>) -> Self {
        self.intention = intention.into();
        self
    }

    /// Sets the reflections.
    #[must_use]
    pub fn with_reflections(mut self, reflections: impl Into<String>) -> Self {
        self.reflections = reflections.into();
        self
    }

    /// Sets both mood values.
    #[must_use]
    pub const fn with_moods(mut self, before: i64, after: i64) -> Self {
        self.mood_before = before;
        self.mood_after = after;
        self
    }

    /// Attaches a music link.
    #[must_use]
    pub fn with_music_link(mut self, link: MusicLink) -> Self {
        self.music_link = Some(link);
        self
    }

    /// Returns the music link URL, if any.
    #[must_use]
    pub fn music_url(&self) -> Option<&str> {
        self.music_link.as_ref().map(|l| l.url.as_str())
    }

    /// Returns the mood change across the session, saturating at the `i64` bounds.
    #[must_use]
    pub const fn mood_delta(&self) -> i64 {
        self.mood_after.saturating_sub(self.mood_before)
    }
}
