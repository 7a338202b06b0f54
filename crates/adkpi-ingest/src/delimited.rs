//! Delimited (CSV) export loading.
//!
//! Ad-platform exports come with `;` (Brazilian locale), `,` or tab
//! delimiters and often a UTF-8 BOM. The delimiter is sniffed from the first
//! non-blank line. All cells are read as text; typing happens during
//! normalization.

use std::path::Path;
use std::time::Instant;

use csv::ReaderBuilder;
use tracing::{debug, info, info_span};

use adkpi_model::{CellValue, RawTable};

use crate::error::{IngestError, Result};

const CANDIDATE_DELIMITERS: [u8; 3] = [b';', b',', b'\t'];

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn normalize_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        CellValue::Missing
    } else {
        CellValue::text(trimmed)
    }
}

/// Picks the candidate delimiter occurring most often outside quotes in
/// `line`. Ties go to the earlier candidate; no candidate means `,`.
pub fn sniff_delimiter(line: &str) -> u8 {
    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(idx) = CANDIDATE_DELIMITERS.iter().position(|d| *d == byte) {
            counts[idx] += 1;
        }
    }
    let best = counts
        .iter()
        .enumerate()
        .fold(0, |best, (idx, count)| if *count > counts[best] { idx } else { best });
    if counts[best] == 0 {
        b','
    } else {
        CANDIDATE_DELIMITERS[best]
    }
}

/// Reads a delimited file into a raw table.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_delimited(path: &Path) -> Result<RawTable> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    parse_delimited(&text, &path.display().to_string())
}

/// Reads delimited text (e.g. an uploaded file's contents) into a raw table.
pub fn read_delimited_str(text: &str) -> Result<RawTable> {
    parse_delimited(text, "input")
}

fn parse_delimited(text: &str, source_name: &str) -> Result<RawTable> {
    let span = info_span!("ingest", source = %source_name);
    let _guard = span.enter();
    let start = Instant::now();

    let text = text.trim_start_matches('\u{feff}');
    let Some(first_line) = text.lines().find(|line| !line.trim().is_empty()) else {
        return Err(IngestError::Empty {
            source_name: source_name.to_string(),
        });
    };
    let delimiter = sniff_delimiter(first_line);
    debug!(delimiter = %char::from(delimiter).escape_default(), "delimiter sniffed");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match &headers {
            None => headers = Some(record.iter().map(normalize_header).collect()),
            Some(_) => rows.push(record.iter().map(normalize_cell).collect()),
        }
    }
    let Some(headers) = headers else {
        return Err(IngestError::Empty {
            source_name: source_name.to_string(),
        });
    };

    let table = RawTable::from_rows(headers, rows);
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(table)
}
