//! Single-pass transmission writer.
//!
//! ```text
//! HDR
//! NWR            ┐
//! SWR|PUB SPT TER│ per party
//! ...            ┘ per work
//! TRL
//! ```
//!
//! The line counter lives in a [`RecordSequence`] owned by the [`Emitter`],
//! so two conversions never share state. [`Emitter::finish`] consumes the
//! emitter: nothing can be written after the trailer.

use super::records::{HeaderInfo, Record};
use crate::models::ExtractedWork;

/// Running counters for one transmission.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordSequence {
    lines: u64,
    works: u32,
}

impl RecordSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one emitted line.
    pub fn record(&mut self) {
        self.lines += 1;
    }

    /// Allocate the next work sequence number (1-based).
    pub fn next_work(&mut self) -> u32 {
        self.works += 1;
        self.works
    }

    /// Lines emitted so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Works emitted so far.
    pub fn works(&self) -> u32 {
        self.works
    }
}

/// Writes one transmission.
#[derive(Debug)]
pub struct Emitter {
    out: String,
    sequence: RecordSequence,
}

impl Emitter {
    /// Start a transmission; the header line is written immediately.
    pub fn new(header: &HeaderInfo) -> Self {
        let mut emitter = Self {
            out: String::new(),
            sequence: RecordSequence::new(),
        };
        emitter.push(Record::Header(header));
        emitter
    }

    fn push(&mut self, record: Record<'_>) {
        self.out.push_str(&record.render());
        self.out.push('\n');
        self.sequence.record();
    }

    /// Write the `NWR` line and the party line groups of one work.
    ///
    /// Returns the work sequence number assigned to it.
    pub fn emit_work(&mut self, extracted: &ExtractedWork) -> u32 {
        let work_seq = self.sequence.next_work();
        self.push(Record::Work {
            work_seq,
            work: &extracted.work,
        });

        for (party_seq, party) in (1u32..).zip(&extracted.parties) {
            let society = extracted.societies.society_for(&party.name);
            let role_line = if party.role.is_publisher() {
                Record::Publisher {
                    work_seq,
                    party,
                    society,
                }
            } else {
                Record::Songwriter {
                    work_seq,
                    party,
                    role_code: party.role.to_code().unwrap_or_default(),
                    society,
                }
            };
            self.push(role_line);
            self.push(Record::Share {
                work_seq,
                party_seq,
                share: party.share,
            });
            self.push(Record::Territory {
                work_seq,
                party_seq,
                territory: &extracted.work.territory,
            });
        }

        work_seq
    }

    pub fn sequence(&self) -> &RecordSequence {
        &self.sequence
    }

    /// Write the trailer and return the finished transmission.
    ///
    /// The trailer count includes the header and the trailer itself.
    pub fn finish(mut self) -> String {
        let record_count = self.sequence.lines() + 1;
        self.push(Record::Trailer { record_count });
        self.out
    }
}

/// Emit a complete transmission for `works`, in order.
pub fn emit(header: &HeaderInfo, works: &[ExtractedWork]) -> String {
    let mut emitter = Emitter::new(header);
    for work in works {
        emitter.emit_work(work);
    }
    emitter.finish()
}
