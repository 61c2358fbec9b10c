//! Static column alias table.
//!
//! Registration spreadsheets come from a template whose headers double as
//! filling instructions, so a header is often a whole sentence with a
//! parenthetical example and a trailing line break. Lookup is exact: the
//! header must match one of the strings below byte for byte.

use crate::models::Row;

/// Logical fields the extractor reads from a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Iswc,
    Duration,
    Language,
    Genre,
    Territory,
    InterestedParties,
    AffiliatedSocieties,
}

/// Field → accepted headers, in priority order.
pub static COLUMN_ALIASES: &[(Field, &[&str])] = &[
    (
        Field::Title,
        &[
            "title",
            "Work Title (main title of the musical work, as it should appear on registrations)\n",
        ],
    ),
    (
        Field::Iswc,
        &[
            "iswc",
            "ISWC (International Standard Musical Work Code, e.g. T-123.456.789-0; leave blank if not assigned yet)\n",
        ],
    ),
    (Field::Duration, &["duration", "Duration (MM:SS)\n"]),
    (
        Field::Language,
        &[
            "language",
            "Language (three-letter code of the lyrics, e.g. ENG, FRA, SPA)\n",
        ],
    ),
    (Field::Genre, &["genre", "Genre (e.g. Pop, Jazz, Classical)\n"]),
    (
        Field::Territory,
        &["territory", "Territory (World, or the code of the territory)\n"],
    ),
    (
        Field::InterestedParties,
        &[
            "interested_parties",
            "Interested Parties (for each party: Name IPI (Role) Share, roles C = Composer, A = Author, C/A = Composer/Author, P = Publisher, e.g. Jane Doe 123456789 (C) 50)\n",
        ],
    ),
    (
        Field::AffiliatedSocieties,
        &[
            "affiliated_societies",
            "Affiliated Societies (for each party: Name Society, e.g. Jane Doe BMI)\n",
        ],
    ),
];

impl Field {
    /// Every header accepted for this field.
    pub fn aliases(self) -> &'static [&'static str] {
        COLUMN_ALIASES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }
}

/// Value of `field` in `row`, or `None` when every alias is absent or blank.
pub fn resolve(row: &Row, field: Field) -> Option<&str> {
    field
        .aliases()
        .iter()
        .filter_map(|header| row.get(*header))
        .map(String::as_str)
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_every_field_has_aliases() {
        for field in [
            Field::Title,
            Field::Iswc,
            Field::Duration,
            Field::Language,
            Field::Genre,
            Field::Territory,
            Field::InterestedParties,
            Field::AffiliatedSocieties,
        ] {
            assert!(!field.aliases().is_empty(), "{:?}", field);
        }
    }

    #[test]
    fn test_plain_header() {
        let r = row(&[("title", "Test Song")]);
        assert_eq!(resolve(&r, Field::Title), Some("Test Song"));
    }

    #[test]
    fn test_verbose_header_with_trailing_newline() {
        let r = row(&[("Duration (MM:SS)\n", "3:45")]);
        assert_eq!(resolve(&r, Field::Duration), Some("3:45"));
    }

    #[test]
    fn test_no_fuzzy_matching() {
        let r = row(&[
            ("Duration (MM:SS)", "3:45"),
            ("Title", "Test Song"),
            ("duration ", "1:00"),
        ]);
        assert_eq!(resolve(&r, Field::Duration), None);
        assert_eq!(resolve(&r, Field::Title), None);
    }

    #[test]
    fn test_blank_value_is_missing() {
        let r = row(&[("genre", "   "), ("Genre (e.g. Pop, Jazz, Classical)\n", "Jazz")]);
        assert_eq!(resolve(&r, Field::Genre), Some("Jazz"));

        let r = row(&[("genre", "")]);
        assert_eq!(resolve(&r, Field::Genre), None);
    }

    #[test]
    fn test_first_alias_wins() {
        let r = row(&[("genre", "Pop"), ("Genre (e.g. Pop, Jazz, Classical)\n", "Jazz")]);
        assert_eq!(resolve(&r, Field::Genre), Some("Pop"));
    }
}
