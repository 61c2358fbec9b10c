//! Field extractor: one raw [`Row`] → normalized work data.
//!
//! Every function here is pure and infallible. A missing column, a blank
//! cell or a malformed sub-field never rejects the row; it falls back to the
//! documented default instead:
//!
//! | Field       | Default          |
//! |-------------|------------------|
//! | title       | `UNKNOWN_TITLE`  |
//! | iswc        | empty            |
//! | duration    | `0000`           |
//! | language    | `ENG`            |
//! | genre       | empty            |
//! | territory   | `World`          |
//! | parties     | none             |
//! | societies   | none             |

pub mod columns;
pub mod duration;
pub mod parties;

pub use columns::{resolve, Field, COLUMN_ALIASES};
pub use duration::format_duration;
pub use parties::{parse_interested_parties, parse_societies};

use crate::models::{
    ExtractedWork, InterestedParty, Row, SocietyLookup, Work, DEFAULT_LANGUAGE,
    DEFAULT_TERRITORY, DEFAULT_TITLE,
};

fn text_or(row: &Row, field: Field, default: &str) -> String {
    resolve(row, field).map(str::trim).unwrap_or(default).to_string()
}

/// Work-level fields with defaults applied.
pub fn extract_work(row: &Row) -> Work {
    Work {
        title: text_or(row, Field::Title, DEFAULT_TITLE),
        iswc: text_or(row, Field::Iswc, ""),
        duration_code: format_duration(resolve(row, Field::Duration)),
        language: text_or(row, Field::Language, DEFAULT_LANGUAGE),
        genre: text_or(row, Field::Genre, ""),
        territory: text_or(row, Field::Territory, DEFAULT_TERRITORY),
    }
}

/// Interested parties, in the order they appear in the row.
pub fn extract_parties(row: &Row) -> Vec<InterestedParty> {
    resolve(row, Field::InterestedParties)
        .map(parse_interested_parties)
        .unwrap_or_default()
}

/// Society affiliations of the row's parties.
pub fn extract_societies(row: &Row) -> SocietyLookup {
    resolve(row, Field::AffiliatedSocieties)
        .map(parse_societies)
        .unwrap_or_default()
}

/// Everything the record emitter needs for one row.
pub fn extract(row: &Row) -> ExtractedWork {
    ExtractedWork {
        work: extract_work(row),
        parties: extract_parties(row),
        societies: extract_societies(row),
    }
}
