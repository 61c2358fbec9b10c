//! CSV → rows, with encoding and delimiter auto-detection.
//!
//! Headers are kept verbatim. Registration templates use long quoted
//! headers with parentheses and line breaks, and column lookup is an exact
//! string match, so nothing is trimmed here.

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::Row;

/// Rows plus what was detected while reading them.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// One map per data row, in file order.
    pub rows: Vec<Row>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers, verbatim
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is always UTF-8; chardet only guesses for everything else.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Unknown encodings and invalid UTF-8 fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
        // WHATWG maps the latin-1 labels onto windows-1252
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => {
                let (decoded, _, had_errors) = enc.decode(bytes);
                if had_errors {
                    return Err(CsvError::Encoding(format!(
                        "content is not valid {}",
                        enc.name()
                    )));
                }
                decoded.into_owned()
            }
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };

    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

/// Detect the delimiter by counting candidates in the header record.
///
/// Separators inside quoted headers do not count, so a header such as
/// `"Genre (e.g. Pop, Jazz)"` does not vote for `,`. Defaults to `,`.
pub fn detect_delimiter(content: &str) -> char {
    let separators = [',', ';', '\t', '|'];
    let mut counts = [0usize; 4];
    let mut in_quotes = false;

    for c in content.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\n' | '\r' if !in_quotes => break,
            _ if !in_quotes => {
                if let Some(i) = separators.iter().position(|&s| s == c) {
                    counts[i] += 1;
                }
            }
            _ => {}
        }
    }

    let mut best_sep = ',';
    let mut best_count = 0;
    for (&sep, &count) in separators.iter().zip(counts.iter()) {
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }
    best_sep
}

/// Parse CSV text into rows with an explicit delimiter.
///
/// # Example
/// ```ignore
/// use cwrkit::csv_to_rows;
///
/// let rows = csv_to_rows("title,duration\nMy Song,3:45", ',').unwrap();
/// assert_eq!(rows[0]["duration"], "3:45");
/// ```
pub fn csv_to_rows(csv: &str, delimiter: char) -> CsvResult<Vec<Row>> {
    parse_string_with_metadata(csv, delimiter, "utf-8".to_string()).map(|r| r.rows)
}

/// Parse CSV text with explicit delimiter and return metadata.
pub fn parse_string_with_metadata(
    content: &str,
    delimiter: char,
    encoding: String,
) -> CsvResult<ParseResult> {
    if !delimiter.is_ascii() {
        return Err(CsvError::Parse {
            line: 1,
            message: format!("delimiter '{}' is not ASCII", delimiter),
        });
    }

    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        // Short records simply lack the trailing keys; extra cells are ignored.
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(ParseResult {
        rows,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    parse_string_with_metadata(&content, delimiter, encoding)
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}
