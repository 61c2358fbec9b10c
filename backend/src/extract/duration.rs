//! `MM:SS` duration text → four-digit `MMSS` code.

use crate::models::DEFAULT_DURATION;

/// Convert a duration like `"3:45"` into `"0345"`.
///
/// Each half is parsed as an integer and zero-padded to two digits. Seconds
/// are not range-checked. Anything that does not produce exactly four digits
/// (missing value, wrong number of halves, non-numeric halves, minutes above
/// 99) yields `"0000"`.
pub fn format_duration(raw: Option<&str>) -> String {
    raw.and_then(parse_duration)
        .unwrap_or_else(|| DEFAULT_DURATION.to_string())
}

fn parse_duration(raw: &str) -> Option<String> {
    let mut halves = raw.split(':');
    let minutes = halves.next()?.trim().parse::<u32>().ok()?;
    let seconds = halves.next()?.trim().parse::<u32>().ok()?;
    if halves.next().is_some() {
        return None;
    }

    let code = format!("{:02}{:02}", minutes, seconds);
    (code.len() == 4).then_some(code)
}
