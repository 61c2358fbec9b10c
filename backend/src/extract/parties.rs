//! Free-text parsing of interested parties and society affiliations.
//!
//! Both cells pack several entries into one string with no reliable
//! delimiter:
//!
//! ```text
//! Jane Doe 123456789 (C) 50.5, John Smith 987654321 (P) 49.5
//! Jane Doe BMI John Smith PRS
//! ```
//!
//! Entries are located by the signature they start with. Every match of the
//! signature opens a new entry, which runs until the next match. The regex
//! crate has no lookahead, so the boundaries come from `find_iter` and each
//! entry is the span between two consecutive match starts.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{InterestedParty, PartyRole, SocietyLookup};

/// `<Name> <IPI digits> (<role code>)`
static PARTY_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<name>\p{L}[^\d()]*?)\s+(?P<ipi>\d+)\s*\((?P<role>[\p{L}/]+)\)")
        .expect("party pattern is valid")
});

/// `<Name> <2-3 uppercase letters>`
static SOCIETY_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<name>\p{L}[^\d()]*?)\s+(?P<code>[A-Z]{2,3})\b")
        .expect("society pattern is valid")
});

/// First decimal number in the remainder of an entry.
static SHARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("share pattern is valid"));

/// Split `text` into entries starting at each match of `head`.
///
/// Yields the head captures together with the trailing text of the entry.
/// Anything before the first match belongs to no entry and is dropped.
fn entries<'t>(head: &Regex, text: &'t str) -> Vec<(Captures<'t>, &'t str)> {
    let starts: Vec<usize> = head.find_iter(text).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .filter_map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let entry = &text[start..end];
            if entry.trim().is_empty() {
                return None;
            }
            let caps = head.captures(entry)?;
            let head_end = caps.get(0).map(|m| m.end()).unwrap_or(entry.len());
            Some((caps, &entry[head_end..]))
        })
        .collect()
}

fn clean_name(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '|'))
        .to_string()
}

fn parse_share(tail: &str) -> f64 {
    SHARE
        .find(tail)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|share| share.is_finite())
        .unwrap_or(0.0)
}

/// Parse an interested-party cell into parties, in order of appearance.
///
/// Missing or unparsable shares become `0.0`. Text that never matches the
/// party signature produces no parties.
pub fn parse_interested_parties(text: &str) -> Vec<InterestedParty> {
    entries(&PARTY_HEAD, text)
        .into_iter()
        .map(|(caps, tail)| InterestedParty {
            name: clean_name(&caps["name"]),
            ipi: caps["ipi"].to_string(),
            role: PartyRole::from_code(&caps["role"]),
            share: parse_share(tail),
        })
        .collect()
}

/// Parse an affiliated-society cell into a name → code lookup.
pub fn parse_societies(text: &str) -> SocietyLookup {
    let mut lookup = SocietyLookup::new();
    for (caps, _) in entries(&SOCIETY_HEAD, text) {
        lookup.insert(clean_name(&caps["name"]), &caps["code"]);
    }
    lookup
}
