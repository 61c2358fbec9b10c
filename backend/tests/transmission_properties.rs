//! Structural properties of generated transmissions.

use chrono::NaiveDate;
use cwrkit::{convert_rows, extract, ConvertOptions, HeaderInfo, Row};
use proptest::prelude::*;

fn options() -> ConvertOptions {
    ConvertOptions::new(HeaderInfo::new(
        "SENDER",
        "RECEIVER",
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
    ))
}

/// One well-formed interested-party entry.
fn party_entry() -> impl Strategy<Value = String> {
    (
        "[A-Z][a-z]{1,8}( [A-Z][a-z]{1,8})?",
        "[0-9]{1,11}",
        prop::sample::select(vec!["C", "A", "C/A", "P"]),
        0u32..=100,
    )
        .prop_map(|(name, ipi, role, share)| format!("{} {} ({}) {}", name, ipi, role, share))
}

/// A row together with the number of parties written into it.
fn work_row() -> impl Strategy<Value = (Row, usize)> {
    (
        "\\PC{0,80}",
        "[0-9]{1,2}:[0-9]{2}",
        prop::collection::vec(party_entry(), 0..5),
    )
        .prop_map(|(title, duration, parties)| {
            let mut row = Row::new();
            row.insert("title".to_string(), title);
            row.insert("duration".to_string(), duration);
            row.insert("interested_parties".to_string(), parties.join(", "));
            (row, parties.len())
        })
}

fn rows() -> impl Strategy<Value = Vec<(Row, usize)>> {
    prop::collection::vec(work_row(), 0..12)
}

proptest! {
    #[test]
    fn trailer_counts_every_line(pairs in rows()) {
        let rows: Vec<Row> = pairs.iter().map(|(r, _)| r.clone()).collect();
        let output = convert_rows(&rows, &options());
        let lines: Vec<&str> = output.text.lines().collect();

        let expected = 2 + pairs.iter().map(|(_, p)| 1 + 3 * p).sum::<usize>();
        prop_assert_eq!(lines.len(), expected);
        prop_assert_eq!(output.records, expected as u64);

        let trailer = lines[lines.len() - 1];
        prop_assert_eq!(trailer, format!("TRL{:09}", expected));
    }

    #[test]
    fn work_sequence_is_contiguous(pairs in rows()) {
        let rows: Vec<Row> = pairs.iter().map(|(r, _)| r.clone()).collect();
        let output = convert_rows(&rows, &options());

        let seqs: Vec<String> = output
            .text
            .lines()
            .filter(|l| l.starts_with("NWR"))
            .map(|l| l.chars().skip(3).take(5).collect())
            .collect();
        let expected: Vec<String> = (1..=rows.len()).map(|i| format!("{:05}", i)).collect();
        prop_assert_eq!(seqs, expected);
    }

    #[test]
    fn party_sequence_restarts_per_work(pairs in rows()) {
        let rows: Vec<Row> = pairs.iter().map(|(r, _)| r.clone()).collect();
        let output = convert_rows(&rows, &options());

        let mut per_work: Vec<Vec<String>> = Vec::new();
        for line in output.text.lines() {
            if line.starts_with("NWR") {
                per_work.push(Vec::new());
            } else if line.starts_with("SPT") {
                if let Some(current) = per_work.last_mut() {
                    current.push(line[8..11].to_string());
                }
            }
        }

        prop_assert_eq!(per_work.len(), pairs.len());
        for (seqs, (_, count)) in per_work.iter().zip(&pairs) {
            let expected: Vec<String> = (1..=*count).map(|i| format!("{:03}", i)).collect();
            prop_assert_eq!(seqs, &expected);
        }
    }

    #[test]
    fn records_have_fixed_widths(pairs in rows()) {
        let rows: Vec<Row> = pairs.iter().map(|(r, _)| r.clone()).collect();
        let output = convert_rows(&rows, &options());

        for line in output.text.lines() {
            let width = line.chars().count();
            match &line[..3] {
                "NWR" => prop_assert_eq!(width, 98),
                "SPT" => prop_assert_eq!(width, 16),
                "TER" => prop_assert_eq!(width, 14),
                _ => {}
            }
        }
    }

    #[test]
    fn conversion_is_deterministic(pairs in rows()) {
        let rows: Vec<Row> = pairs.iter().map(|(r, _)| r.clone()).collect();
        let first = convert_rows(&rows, &options());
        let second = convert_rows(&rows, &options());
        prop_assert_eq!(first.text, second.text);
    }

    #[test]
    fn extraction_never_panics(
        title in "\\PC{0,40}",
        duration in "\\PC{0,10}",
        parties in "\\PC{0,120}",
        societies in "\\PC{0,80}",
    ) {
        let mut row = Row::new();
        row.insert("title".to_string(), title);
        row.insert("duration".to_string(), duration);
        row.insert("interested_parties".to_string(), parties);
        row.insert("affiliated_societies".to_string(), societies);

        let extracted = extract(&row);
        prop_assert_eq!(extracted.work.duration_code.len(), 4);
        prop_assert!(extracted.work.duration_code.chars().all(|c| c.is_ascii_digit()));
        for party in &extracted.parties {
            prop_assert!(party.share.is_finite());
            prop_assert!(party.share >= 0.0);
        }
    }
}

#[test]
fn single_work_example() {
    let mut row = Row::new();
    row.insert("title".to_string(), "Test Song".to_string());
    row.insert("duration".to_string(), "3:45".to_string());
    row.insert(
        "interested_parties".to_string(),
        "Jane Doe 123456789 (C) 50.5".to_string(),
    );
    let output = convert_rows(&[row], &options());
    let lines: Vec<&str> = output.text.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "HDRSENDER   RECEIVER 20240309CWR2.1 ");
    assert!(lines[1].starts_with("NWR00001Test Song"));
    assert_eq!(&lines[1][79..83], "0345");
    assert!(lines[2].starts_with("SWR00001Jane Doe"));
    assert_eq!(&lines[2][79..81], "C ");
    assert_eq!(lines[3], "SPT0000100105050");
    assert_eq!(lines[4], "TER00001001001");
    assert_eq!(lines[5], "TRL000000006");
}
