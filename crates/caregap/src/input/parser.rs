//! CSV parser with delimiter detection.

use std::cmp::Reverse;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{CaregapError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b',', b'\t', b';', b'|'];

/// Parses per-entity source files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file and return the data table and its provenance.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| CaregapError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = detect_delimiter(&contents)?;
        let data_table = self.parse_bytes(&contents, delimiter)?;

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    /// Parse bytes directly. A header without data rows is an empty table.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(CaregapError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            // Short rows are padded, long rows truncated, to the header width.
            row.resize(expected_cols, String::new());

            rows.push(row);
        }

        Ok(DataTable::new(headers, rows))
    }
}

/// Pick the delimiter from the header line and the first data line.
///
/// A candidate must split the header; one that splits both lines into the
/// same number of fields is preferred. Ties go to the earlier candidate.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let mut lines = BufReader::new(bytes)
        .lines()
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| CaregapError::EmptyData("No lines to analyze".to_string()))?;
    let first_row = lines.next();

    let best = DELIMITERS
        .iter()
        .map(|&delim| {
            let fields = unquoted_count(&header, delim);
            let consistent = first_row
                .as_deref()
                .is_none_or(|row| unquoted_count(row, delim) == fields);
            (delim, fields, consistent)
        })
        .filter(|&(_, fields, _)| fields > 0)
        .min_by_key(|&(_, fields, consistent)| Reverse((consistent, fields)));

    Ok(best.map_or(b',', |(delim, _, _)| delim))
}

/// Occurrences of `delimiter` outside double quotes.
fn unquoted_count(line: &str, delimiter: u8) -> usize {
    line.bytes()
        .fold((0, false), |(count, quoted), b| match b {
            b'"' => (count, !quoted),
            b if b == delimiter && !quoted => (count + 1, quoted),
            _ => (count, quoted),
        })
        .0
}
