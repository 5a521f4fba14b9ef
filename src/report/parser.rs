use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::models::{FIELD_COUNT, TransactionRow};
use crate::report::ParseError;

/// Extracts the data rows from a pasted transaction report.
///
/// Lines are trimmed and lowercased, then scanned for the header boundary: a
/// line equal to `total` immediately followed by a line starting with
/// `total: $`. Data rows begin past that pair. Each remaining line is split
/// on tabs and retained only when it has exactly [`FIELD_COUNT`] fields;
/// section headers, summary lines, and blank trailers fall out of that
/// filter silently.
///
/// # Errors
/// `ParseError::BoundaryNotFound` when the sentinel pair never appears,
/// empty input included.
pub fn parse_report(text: &str) -> Result<Vec<TransactionRow>, ParseError> {
    let lines: Vec<String> = text.lines().map(|line| line.trim().to_lowercase()).collect();

    let boundary = lines
        .windows(2)
        .position(|pair| pair[0] == "total" && pair[1].starts_with("total: $"))
        .ok_or(ParseError::BoundaryNotFound)?;

    let data = lines[boundary + 2..].join("\n");

    // The report is pasted text, not quoted CSV; tabs are the only structure.
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(data.as_bytes());

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let record = result?;

        if record.len() != FIELD_COUNT {
            dropped += 1;
            continue;
        }

        let row: TransactionRow = record.deserialize(None)?;
        rows.push(row);
    }

    if dropped > 0 {
        debug!("Dropped {dropped} non-data line(s) from the pasted report");
    }

    Ok(rows)
}
