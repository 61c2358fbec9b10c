//! High-level conversion API: CSV in, transmission text out.
//!
//! # Example
//!
//! ```rust,ignore
//! use cwrkit::{convert_file, Config, ConvertOptions, JobLog};
//!
//! let config = Config::from_env()?;
//! let report = convert_file("catalog.csv", &ConvertOptions::from_config(&config), &JobLog::untagged())?;
//! std::fs::write("catalog.cwr", &report.output.text)?;
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::logs::JobLog;
use crate::config::Config;
use crate::cwr::{Emitter, HeaderInfo};
use crate::error::ConvertResult;
use crate::extract::{extract, resolve, Field, COLUMN_ALIASES};
use crate::models::{ExtractedWork, Row};
use crate::parser::{parse_bytes_auto, parse_file_auto, ParseResult};

/// Extension of generated files.
pub const OUTPUT_EXTENSION: &str = "cwr";

/// Options for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub header: HeaderInfo,
}

impl ConvertOptions {
    pub fn new(header: HeaderInfo) -> Self {
        Self { header }
    }

    /// Header identification from `config`, dated today.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.header_info_today())
    }
}

/// Generated transmission and its counts.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertOutput {
    pub text: String,
    pub works: usize,
    pub parties: usize,
    /// Lines written, header and trailer included.
    pub records: u64,
}

/// CSV file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Result of converting a whole file.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    pub output: ConvertOutput,
    pub csv_info: CsvInfo,
}

/// Run the field extractor on every row.
pub fn extract_rows(rows: &[Row]) -> Vec<ExtractedWork> {
    rows.iter().map(extract).collect()
}

/// Convert rows into a transmission. Never fails.
pub fn convert_rows(rows: &[Row], options: &ConvertOptions) -> ConvertOutput {
    let works = extract_rows(rows);
    convert_works(&works, options)
}

fn convert_works(works: &[ExtractedWork], options: &ConvertOptions) -> ConvertOutput {
    let mut emitter = Emitter::new(&options.header);
    for work in works {
        emitter.emit_work(work);
    }
    let records = emitter.sequence().lines() + 1;
    let emitted = emitter.sequence().works() as usize;

    ConvertOutput {
        text: emitter.finish(),
        works: emitted,
        parties: works.iter().map(|w| w.parties.len()).sum(),
        records,
    }
}

/// Convert an already parsed table, logging progress to `log`.
pub fn convert_parsed(parsed: ParseResult, options: &ConvertOptions, log: &JobLog) -> ConvertReport {
    log.success(format!("Detected encoding: {}", parsed.encoding));
    log.success(format!(
        "Detected separator: '{}'",
        format_delimiter(parsed.delimiter)
    ));
    log.success(format!("Read {} rows", parsed.rows.len()));

    let recognized = recognized_fields(&parsed.headers);
    if recognized.is_empty() {
        log.warning("No recognized columns, every work will use default values");
    } else {
        log.info(format!(
            "Recognized {} of {} columns",
            recognized.len(),
            parsed.headers.len()
        ));
    }
    if parsed.rows.is_empty() {
        log.warning("No data rows, writing header and trailer only");
    }

    let works = extract_rows(&parsed.rows);
    for (i, (row, work)) in parsed.rows.iter().zip(&works).enumerate() {
        if work.parties.is_empty() && resolve(row, Field::InterestedParties).is_some() {
            log.warning(format!(
                "Row {}: interested parties could not be read, no party lines written",
                i + 1
            ));
        }
    }

    let output = convert_works(&works, options);
    log.success(format!(
        "{} works, {} interested parties, {} records",
        output.works, output.parties, output.records
    ));

    ConvertReport {
        csv_info: CsvInfo {
            encoding: parsed.encoding,
            delimiter: parsed.delimiter,
            headers: parsed.headers,
            row_count: parsed.rows.len(),
        },
        output,
    }
}

/// Parse CSV bytes and convert them.
pub fn convert_bytes(
    bytes: &[u8],
    options: &ConvertOptions,
    log: &JobLog,
) -> ConvertResult<ConvertReport> {
    log.info("📖 Reading CSV...");
    let parsed = parse_bytes_auto(bytes)?;
    Ok(convert_parsed(parsed, options, log))
}

/// Parse a CSV file and convert it.
pub fn convert_file<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
    log: &JobLog,
) -> ConvertResult<ConvertReport> {
    log.info(format!("📖 Reading {}...", path.as_ref().display()));
    let parsed = parse_file_auto(path)?;
    Ok(convert_parsed(parsed, options, log))
}

/// Logical fields whose column is present in `headers`.
pub fn recognized_fields(headers: &[String]) -> Vec<Field> {
    COLUMN_ALIASES
        .iter()
        .filter(|(_, aliases)| aliases.iter().any(|a| headers.iter().any(|h| h == a)))
        .map(|(field, _)| *field)
        .collect()
}

/// Output name for an uploaded file: `works.csv` → `works.cwr`.
pub fn output_file_name(original: Option<&str>) -> String {
    let stem = original
        .map(Path::new)
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && !s.starts_with('.'))
        .unwrap_or("converted");
    format!("{}.{}", stem, OUTPUT_EXTENSION)
}

/// Write `content` to `dir/file_name`, creating `dir` if needed.
pub fn write_output(dir: &Path, file_name: &str, content: &str) -> ConvertResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, content)?;
    Ok(path)
}

/// Format delimiter for display
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn options() -> ConvertOptions {
        ConvertOptions::new(HeaderInfo::new(
            "SENDER",
            "RECEIVER",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        ))
    }

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_convert_rows_example() {
        let rows = vec![row(&[
            ("title", "Test Song"),
            ("duration", "3:45"),
            ("interested_parties", "Jane Doe 123456789 (C) 50.5"),
        ])];
        let output = convert_rows(&rows, &options());

        let lines: Vec<&str> = output.text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(&lines[1][79..85], "0345  ");
        assert!(lines[2].starts_with("SWR00001Jane Doe"));
        assert_eq!(lines[3], "SPT0000100105050");
        assert_eq!(lines[4], "TER00001001001");
        assert_eq!(output.records, 6);
        assert_eq!(output.works, 1);
        assert_eq!(output.parties, 1);
    }

    #[test]
    fn test_padded_world_territory_is_001() {
        let rows = vec![row(&[
            ("title", "Song"),
            ("territory", "World "),
            ("interested_parties", "Jane Doe 123456789 (C) 100"),
        ])];
        let output = convert_rows(&rows, &options());
        let lines: Vec<&str> = output.text.lines().collect();
        assert_eq!(lines[4], "TER00001001001");
    }

    #[test]
    fn test_publisher_gets_pub_line() {
        let rows = vec![row(&[("interested_parties", "Acme 222333444 (P) 100")])];
        let output = convert_rows(&rows, &options());
        let lines: Vec<&str> = output.text.lines().collect();
        assert!(lines[2].starts_with("PUB00001Acme"));
        assert_eq!(lines[2].chars().count(), 3 + 5 + 60 + 11 + 3);
    }

    #[test]
    fn test_convert_bytes_reports_csv_info() {
        let csv = "title;duration;interested_parties\nSong A;3:00;Jane Doe 1 (C) 100\nSong B;;\n";
        let report = convert_bytes(csv.as_bytes(), &options(), &JobLog::untagged()).unwrap();

        assert_eq!(report.csv_info.delimiter, ';');
        assert_eq!(report.csv_info.row_count, 2);
        assert_eq!(report.output.works, 2);
        assert_eq!(report.output.records, 1 + 4 + 1 + 1);
        assert!(report.output.text.ends_with("TRL000000007\n"));
    }

    #[test]
    fn test_header_only_csv_still_converts() {
        let report = convert_bytes(b"title,duration\n", &options(), &JobLog::untagged()).unwrap();
        assert_eq!(report.output.works, 0);
        assert_eq!(report.output.text.lines().count(), 2);
    }

    #[test]
    fn test_convert_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        fs::write(&path, "title,duration\nSong,2:10\n").unwrap();

        let report = convert_file(&path, &options(), &JobLog::untagged()).unwrap();
        assert!(report.output.text.contains("NWR00001Song"));
    }

    #[test]
    fn test_recognized_fields() {
        let headers = vec![
            "title".to_string(),
            "Duration (MM:SS)\n".to_string(),
            "Comments".to_string(),
        ];
        assert_eq!(
            recognized_fields(&headers),
            vec![Field::Title, Field::Duration]
        );
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(Some("works.csv")), "works.cwr");
        assert_eq!(output_file_name(Some("../../etc/passwd.csv")), "passwd.cwr");
        assert_eq!(output_file_name(Some("archive.2024.csv")), "archive.2024.cwr");
        assert_eq!(output_file_name(None), "converted.cwr");
        assert_eq!(output_file_name(Some("")), "converted.cwr");
    }

    #[test]
    fn test_write_output_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("converted");
        let path = write_output(&target, "works.cwr", "HDR\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "HDR\n");
    }
}
