//! Record layouts.
//!
//! Each record is a three-letter prefix followed by fixed-width fields:
//!
//! | Record | Fields (width)                                                       |
//! |--------|----------------------------------------------------------------------|
//! | `HDR`  | sender(9) receiver(9) date(8) version(7)                             |
//! | `NWR`  | work seq(5) title(60) iswc(11) duration(6) language(3) genre(10)     |
//! | `SWR`  | work seq(5) name(60) ipi(11) role(2) society(3)                      |
//! | `PUB`  | work seq(5) name(60) ipi(11) society(3)                              |
//! | `SPT`  | work seq(5) party seq(3) share(5)                                    |
//! | `TER`  | work seq(5) party seq(3) territory(3)                                |
//! | `TRL`  | record count(9)                                                      |

use chrono::NaiveDate;

use super::fixed::{format_share, pad_field, territory_code, zero_pad};
use crate::models::{InterestedParty, Work};

pub const SENDER_WIDTH: usize = 9;
pub const RECEIVER_WIDTH: usize = 9;
pub const DATE_WIDTH: usize = 8;
pub const VERSION_WIDTH: usize = 7;
pub const WORK_SEQ_WIDTH: usize = 5;
pub const PARTY_SEQ_WIDTH: usize = 3;
pub const TITLE_WIDTH: usize = 60;
pub const ISWC_WIDTH: usize = 11;
pub const DURATION_WIDTH: usize = 6;
pub const LANGUAGE_WIDTH: usize = 3;
pub const GENRE_WIDTH: usize = 10;
pub const NAME_WIDTH: usize = 60;
pub const IPI_WIDTH: usize = 11;
pub const ROLE_WIDTH: usize = 2;
pub const SOCIETY_WIDTH: usize = 3;
pub const SHARE_WIDTH: usize = 5;
pub const TERRITORY_WIDTH: usize = 3;
pub const COUNT_WIDTH: usize = 9;

/// Identification written on the `HDR` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub sender_id: String,
    pub receiver_id: String,
    pub date: NaiveDate,
    pub version_tag: String,
}

impl HeaderInfo {
    pub fn new(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            date,
            version_tag: crate::config::DEFAULT_VERSION_TAG.to_string(),
        }
    }

    pub fn with_version_tag(mut self, tag: impl Into<String>) -> Self {
        self.version_tag = tag.into();
        self
    }
}

/// One line of a transmission.
#[derive(Debug, Clone, PartialEq)]
pub enum Record<'a> {
    Header(&'a HeaderInfo),
    Work {
        work_seq: u32,
        work: &'a Work,
    },
    Songwriter {
        work_seq: u32,
        party: &'a InterestedParty,
        role_code: &'static str,
        society: &'a str,
    },
    Publisher {
        work_seq: u32,
        party: &'a InterestedParty,
        society: &'a str,
    },
    Share {
        work_seq: u32,
        party_seq: u32,
        share: f64,
    },
    Territory {
        work_seq: u32,
        party_seq: u32,
        territory: &'a str,
    },
    Trailer {
        record_count: u64,
    },
}

fn seq(value: impl ToString, width: usize) -> String {
    zero_pad(&value.to_string(), width)
}

impl Record<'_> {
    pub fn prefix(&self) -> &'static str {
        match self {
            Record::Header(_) => "HDR",
            Record::Work { .. } => "NWR",
            Record::Songwriter { .. } => "SWR",
            Record::Publisher { .. } => "PUB",
            Record::Share { .. } => "SPT",
            Record::Territory { .. } => "TER",
            Record::Trailer { .. } => "TRL",
        }
    }

    /// Render the record without its line terminator.
    pub fn render(&self) -> String {
        let mut line = String::from(self.prefix());
        match self {
            Record::Header(info) => {
                line.push_str(&pad_field(&info.sender_id, SENDER_WIDTH));
                line.push_str(&pad_field(&info.receiver_id, RECEIVER_WIDTH));
                line.push_str(&pad_field(
                    &info.date.format("%Y%m%d").to_string(),
                    DATE_WIDTH,
                ));
                line.push_str(&pad_field(&info.version_tag, VERSION_WIDTH));
            }
            Record::Work { work_seq, work } => {
                line.push_str(&seq(work_seq, WORK_SEQ_WIDTH));
                line.push_str(&pad_field(&work.title, TITLE_WIDTH));
                line.push_str(&pad_field(&work.iswc, ISWC_WIDTH));
                line.push_str(&pad_field(&work.duration_code, DURATION_WIDTH));
                line.push_str(&pad_field(&work.language, LANGUAGE_WIDTH));
                line.push_str(&pad_field(&work.genre, GENRE_WIDTH));
            }
            Record::Songwriter {
                work_seq,
                party,
                role_code,
                society,
            } => {
                line.push_str(&seq(work_seq, WORK_SEQ_WIDTH));
                line.push_str(&pad_field(&party.name, NAME_WIDTH));
                line.push_str(&pad_field(&party.ipi, IPI_WIDTH));
                line.push_str(&pad_field(role_code, ROLE_WIDTH));
                line.push_str(&pad_field(society, SOCIETY_WIDTH));
            }
            Record::Publisher {
                work_seq,
                party,
                society,
            } => {
                line.push_str(&seq(work_seq, WORK_SEQ_WIDTH));
                line.push_str(&pad_field(&party.name, NAME_WIDTH));
                line.push_str(&pad_field(&party.ipi, IPI_WIDTH));
                line.push_str(&pad_field(society, SOCIETY_WIDTH));
            }
            Record::Share {
                work_seq,
                party_seq,
                share,
            } => {
                line.push_str(&seq(work_seq, WORK_SEQ_WIDTH));
                line.push_str(&seq(party_seq, PARTY_SEQ_WIDTH));
                line.push_str(&pad_field(&format_share(*share), SHARE_WIDTH));
            }
            Record::Territory {
                work_seq,
                party_seq,
                territory,
            } => {
                line.push_str(&seq(work_seq, WORK_SEQ_WIDTH));
                line.push_str(&seq(party_seq, PARTY_SEQ_WIDTH));
                line.push_str(&pad_field(&territory_code(territory), TERRITORY_WIDTH));
            }
            Record::Trailer { record_count } => {
                line.push_str(&seq(record_count, COUNT_WIDTH));
            }
        }
        debug_assert_eq!(line.chars().count(), self.width());
        line
    }

    /// Rendered length of this record type.
    pub fn width(&self) -> usize {
        3 + match self {
            Record::Header(_) => SENDER_WIDTH + RECEIVER_WIDTH + DATE_WIDTH + VERSION_WIDTH,
            Record::Work { .. } => {
                WORK_SEQ_WIDTH
                    + TITLE_WIDTH
                    + ISWC_WIDTH
                    + DURATION_WIDTH
                    + LANGUAGE_WIDTH
                    + GENRE_WIDTH
            }
            Record::Songwriter { .. } => {
                WORK_SEQ_WIDTH + NAME_WIDTH + IPI_WIDTH + ROLE_WIDTH + SOCIETY_WIDTH
            }
            Record::Publisher { .. } => WORK_SEQ_WIDTH + NAME_WIDTH + IPI_WIDTH + SOCIETY_WIDTH,
            Record::Share { .. } => WORK_SEQ_WIDTH + PARTY_SEQ_WIDTH + SHARE_WIDTH,
            Record::Territory { .. } => WORK_SEQ_WIDTH + PARTY_SEQ_WIDTH + TERRITORY_WIDTH,
            Record::Trailer { .. } => COUNT_WIDTH,
        }
    }
}
