//! Closed vocabularies shared by the journal and its interchange format.
//!
//! Each enumeration owns exactly one display-name table (`display_name`).
//! Lookups by display name walk [`all`](TreatmentType::all) and compare against
//! that table, so the export and import directions cannot drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Substance or modality used in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreatmentType {
    /// Psilocybin mushrooms.
    #[default]
    Psilocybin,
    /// Lysergic acid diethylamide.
    Lsd,
    /// MDMA.
    Mdma,
    /// Ketamine.
    Ketamine,
    /// N,N-Dimethyltryptamine.
    Dmt,
    /// Ayahuasca brew.
    Ayahuasca,
    /// Mescaline (peyote, San Pedro).
    Mescaline,
    /// Cannabis.
    Cannabis,
    /// Anything not listed above.
    Other,
}

impl TreatmentType {
    /// Returns all treatment types in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Psilocybin,
            Self::Lsd,
            Self::Mdma,
            Self::Ketamine,
            Self::Dmt,
            Self::Ayahuasca,
            Self::Mescaline,
            Self::Cannabis,
            Self::Other,
        ]
    }

    /// Returns the stable internal identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Psilocybin => "psilocybin",
            Self::Lsd => "lsd",
            Self::Mdma => "mdma",
            Self::Ketamine => "ketamine",
            Self::Dmt => "dmt",
            Self::Ayahuasca => "ayahuasca",
            Self::Mescaline => "mescaline",
            Self::Cannabis => "cannabis",
            Self::Other => "other",
        }
    }

    /// Returns the human-readable name, which is also the CSV representation.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Psilocybin => "Psilocybin",
            Self::Lsd => "LSD",
            Self::Mdma => "MDMA",
            Self::Ketamine => "Ketamine",
            Self::Dmt => "DMT",
            Self::Ayahuasca => "Ayahuasca",
            Self::Mescaline => "Mescaline",
            Self::Cannabis => "Cannabis",
            Self::Other => "Other",
        }
    }

    /// Finds the case whose display name matches `name` exactly.
    ///
    /// Matching is case-sensitive: `"lsd"` does not match `"LSD"`.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.display_name() == name)
    }

    /// Parses user input leniently (identifier or display name, any case).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::all().iter().copied().find(|t| {
            t.as_str().eq_ignore_ascii_case(needle) || t.display_name().eq_ignore_ascii_case(needle)
        })
    }
}

impl fmt::Display for TreatmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Route of administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrationMethod {
    /// Swallowed.
    #[default]
    Oral,
    /// Insufflated.
    Nasal,
    /// Injected into muscle.
    Intramuscular,
    /// Injected into a vein.
    Intravenous,
    /// Held under the tongue.
    Sublingual,
    /// Smoked.
    Smoked,
    /// Vaporized and inhaled.
    Vaporized,
    /// Anything not listed above.
    Other,
}

impl AdministrationMethod {
    /// Returns all administration methods in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Oral,
            Self::Nasal,
            Self::Intramuscular,
            Self::Intravenous,
            Self::Sublingual,
            Self::Smoked,
            Self::Vaporized,
            Self::Other,
        ]
    }

    /// Returns the stable internal identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Oral => "oral",
            Self::Nasal => "nasal",
            Self::Intramuscular => "intramuscular",
            Self::Intravenous => "intravenous",
            Self::Sublingual => "sublingual",
            Self::Smoked => "smoked",
            Self::Vaporized => "vaporized",
            Self::Other => "other",
        }
    }

    /// Returns the human-readable name, which is also the CSV representation.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Oral => "Oral",
            Self::Nasal => "Nasal",
            Self::Intramuscular => "Intramuscular",
            Self::Intravenous => "Intravenous",
            Self::Sublingual => "Sublingual",
            Self::Smoked => "Smoked",
            Self::Vaporized => "Vaporized",
            Self::Other => "Other",
        }
    }

    /// Finds the case whose display name matches `name` exactly.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.display_name() == name)
    }

    /// Parses user input leniently (identifier or display name, any case).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::all().iter().copied().find(|m| {
            m.as_str().eq_ignore_ascii_case(needle) || m.display_name().eq_ignore_ascii_case(needle)
        })
    }
}

impl fmt::Display for AdministrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Hosting service a music link points at.
///
/// Always derived from the URL; never written to the interchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MusicProvider {
    /// open.spotify.com and friends.
    Spotify,
    /// youtube.com, music.youtube.com, youtu.be.
    YouTube,
    /// soundcloud.com.
    SoundCloud,
    /// music.apple.com.
    AppleMusic,
    /// Any other host; the URL is kept as a plain link.
    LinkOnly,
}

impl MusicProvider {
    /// Returns the human-readable provider name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::YouTube => "YouTube",
            Self::SoundCloud => "SoundCloud",
            Self::AppleMusic => "Apple Music",
            Self::LinkOnly => "Link",
        }
    }
}

impl fmt::Display for MusicProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
