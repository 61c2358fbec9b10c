//! Record emitter: extracted works → fixed-width CWR-style text.
//!
//! - `fixed`: padding, truncation and numeric field formats
//! - `records`: record layouts and their widths
//! - `emitter`: the single-pass writer and its record counter

pub mod emitter;
pub mod fixed;
pub mod records;

pub use emitter::{emit, Emitter, RecordSequence};
pub use fixed::{format_share, pad_field, territory_code, zero_pad};
pub use records::{HeaderInfo, Record};
