//! Fixed-width field rendering.
//!
//! Text fields are left-justified and space-padded; counters are
//! zero-padded on the left. Either way an overlong value is cut to the
//! column width, keeping its leading characters. Widths count characters.

/// Left-justify `value` in a `width`-character column.
///
/// Control characters (line breaks from multi-line cells, tabs) are written
/// as spaces so a record always stays on one line.
pub fn pad_field(value: &str, width: usize) -> String {
    let mut out: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(width)
        .collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

/// Right-justify `value` in a `width`-character column filled with zeros.
pub fn zero_pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.chars().take(width).collect();
    }
    let mut out: String = std::iter::repeat('0').take(width - len).collect();
    out.push_str(value);
    out
}

/// Share percentage as five digits with two implied decimals.
///
/// `50.5` → `"05050"`, `100` → `"10000"`, `0` → `"00000"`.
pub fn format_share(share: f64) -> String {
    let share = if share.is_finite() && share >= 0.0 {
        share
    } else {
        0.0
    };
    let digits = format!("{:.2}", share).replace('.', "");
    zero_pad(&digits, 5)
}

/// Territory code: `World` is `001`, everything else is written as is.
pub fn territory_code(territory: &str) -> String {
    match territory {
        "World" => pad_field("001", 3),
        other => pad_field(other, 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_field() {
        assert_eq!(pad_field("abc", 6), "abc   ");
        assert_eq!(pad_field("", 3), "   ");
        assert_eq!(pad_field("abcdef", 3), "abc");
        assert_eq!(pad_field("abc", 3), "abc");
    }

    #[test]
    fn test_pad_field_flattens_line_breaks() {
        assert_eq!(pad_field("Line one\nLine\ttwo", 20), "Line one Line two   ");
    }

    #[test]
    fn test_pad_field_counts_chars() {
        assert_eq!(pad_field("Écoute", 8), "Écoute  ");
        assert_eq!(pad_field("Écoute", 2).chars().count(), 2);
    }

    #[test]
    fn test_zero_pad() {
        assert_eq!(zero_pad("1", 5), "00001");
        assert_eq!(zero_pad("12345", 5), "12345");
        assert_eq!(zero_pad("123456", 5), "12345");
        assert_eq!(zero_pad("", 3), "000");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(50.5), "05050");
        assert_eq!(format_share(100.0), "10000");
        assert_eq!(format_share(0.0), "00000");
        assert_eq!(format_share(33.333), "03333");
        assert_eq!(format_share(1000.0), "10000");
    }

    #[test]
    fn test_format_share_rejects_non_finite() {
        assert_eq!(format_share(f64::NAN), "00000");
        assert_eq!(format_share(-5.0), "00000");
    }

    #[test]
    fn test_territory_code() {
        assert_eq!(territory_code("World"), "001");
        assert_eq!(territory_code("FR"), "FR ");
        assert_eq!(territory_code("2136"), "213");
        assert_eq!(territory_code("world"), "wor");
    }
}
