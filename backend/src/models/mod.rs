//! Domain models for the conversion pipeline.
//!
//! - [`Row`] - One raw input row (column header → cell text)
//! - [`Work`] - Normalized work-level fields with defaults applied
//! - [`InterestedParty`] - A creator or publisher parsed from free text
//! - [`PartyRole`] - Normalized role of an interested party
//! - [`SocietyLookup`] - Party name → collecting society code
//! - [`ExtractedWork`] - Everything the emitter needs for one row

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One input row: column header → raw cell value.
///
/// Keys are not guaranteed to be present; an absent key and an empty value
/// are treated the same way (missing).
pub type Row = HashMap<String, String>;

// =============================================================================
// Work
// =============================================================================

/// Default title when the row has none.
pub const DEFAULT_TITLE: &str = "UNKNOWN_TITLE";
/// Default duration code.
pub const DEFAULT_DURATION: &str = "0000";
/// Default language code.
pub const DEFAULT_LANGUAGE: &str = "ENG";
/// Default territory.
pub const DEFAULT_TERRITORY: &str = "World";

/// Work-level fields of a single registration row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub title: String,
    pub iswc: String,
    /// Always exactly four ASCII digits (`MMSS`).
    pub duration_code: String,
    pub language: String,
    pub genre: String,
    pub territory: String,
}

impl Default for Work {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            iswc: String::new(),
            duration_code: DEFAULT_DURATION.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            genre: String::new(),
            territory: DEFAULT_TERRITORY.to_string(),
        }
    }
}

// =============================================================================
// Party Role
// =============================================================================

/// Role of an interested party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyRole {
    /// Composer (C)
    Composer,
    /// Author / lyricist (A)
    Author,
    /// Composer and author (C/A)
    ComposerAuthor,
    /// Publisher (P)
    Publisher,
}

impl PartyRole {
    /// Normalize a source role code.
    ///
    /// Only `C/A`, `C` and `P` are recognized. Every other code, known or not,
    /// is treated as [`PartyRole::Author`].
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "C/A" => Self::ComposerAuthor,
            "C" => Self::Composer,
            "P" => Self::Publisher,
            _ => Self::Author,
        }
    }

    /// Two-character role code written on `SWR` lines.
    ///
    /// Publishers get a `PUB` line which has no role column.
    pub fn to_code(&self) -> Option<&'static str> {
        match self {
            Self::Composer => Some("C"),
            Self::Author => Some("A"),
            Self::ComposerAuthor => Some("CA"),
            Self::Publisher => None,
        }
    }

    pub fn is_publisher(&self) -> bool {
        matches!(self, Self::Publisher)
    }
}

// =============================================================================
// Interested Party
// =============================================================================

/// A creator or publisher holding a share of a work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestedParty {
    pub name: String,
    /// IPI number, digits only.
    pub ipi: String,
    pub role: PartyRole,
    /// Ownership share as written in the source (percentage). 0 when absent.
    pub share: f64,
}

// =============================================================================
// Society Lookup
// =============================================================================

/// Party name → society code (2-3 uppercase letters).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocietyLookup {
    societies: HashMap<String, String>,
}

impl SocietyLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an affiliation. A later entry for the same name wins.
    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<String>) {
        self.societies.insert(name.into(), code.into());
    }

    /// Society code for `name`, or `""` when the party has no known affiliation.
    pub fn society_for(&self, name: &str) -> &str {
        self.societies.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.societies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.societies.is_empty()
    }
}

// =============================================================================
// Extracted Work
// =============================================================================

/// The extractor's full output for one row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedWork {
    pub work: Work,
    pub parties: Vec<InterestedParty>,
    pub societies: SocietyLookup,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_code() {
        assert_eq!(PartyRole::from_code("C"), PartyRole::Composer);
        assert_eq!(PartyRole::from_code("C/A"), PartyRole::ComposerAuthor);
        assert_eq!(PartyRole::from_code("P"), PartyRole::Publisher);
        assert_eq!(PartyRole::from_code("A"), PartyRole::Author);
    }

    #[test]
    fn test_unknown_role_falls_back_to_author() {
        assert_eq!(PartyRole::from_code("AR"), PartyRole::Author);
        assert_eq!(PartyRole::from_code("E"), PartyRole::Author);
        assert_eq!(PartyRole::from_code("c"), PartyRole::Author);
        assert_eq!(PartyRole::from_code(""), PartyRole::Author);
    }

    #[test]
    fn test_role_codes() {
        assert_eq!(PartyRole::Composer.to_code(), Some("C"));
        assert_eq!(PartyRole::ComposerAuthor.to_code(), Some("CA"));
        assert_eq!(PartyRole::Publisher.to_code(), None);
        assert!(PartyRole::Publisher.is_publisher());
    }

    #[test]
    fn test_work_defaults() {
        let work = Work::default();
        assert_eq!(work.title, "UNKNOWN_TITLE");
        assert_eq!(work.duration_code, "0000");
        assert_eq!(work.language, "ENG");
        assert_eq!(work.territory, "World");
        assert!(work.iswc.is_empty());
    }

    #[test]
    fn test_society_lookup_defaults_to_empty() {
        let mut lookup = SocietyLookup::new();
        lookup.insert("Jane Doe", "BMI");
        assert_eq!(lookup.society_for("Jane Doe"), "BMI");
        assert_eq!(lookup.society_for("John Smith"), "");
    }
}
