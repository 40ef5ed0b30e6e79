//! Delimited text tables with every cell kept as text.
//!
//! Cells are never type-inferred, so identifiers such as `012.345.678-90`
//! keep their leading zeros and punctuation until a stage normalizes them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Maximum accepted input size (64 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// A parsed table: one header row followed by data rows of equal width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    /// Name used in error messages (usually the file path).
    pub input: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first header equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.headers.iter().position(|header| *header == wanted)
    }

    /// Position of `name`, or [`IngestError::MissingColumn`].
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| IngestError::MissingColumn {
                column: name.to_string(),
                input: self.input.clone(),
            })
    }

    /// Cell at `row`/`column`; empty when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim_matches('\u{feff}').to_string()
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads a delimited file from disk.
pub fn read_csv_table(path: &Path, delimiter: u8) -> Result<CsvTable> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)?;
    let file = File::open(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_csv_table(file, delimiter, &path.display().to_string())
}

/// Parses delimited text from any reader.
///
/// The first record is the header. Blank lines and rows whose cells are all
/// empty are skipped; short rows are padded with empty cells; rows longer
/// than the header are rejected.
pub fn parse_csv_table<R: Read>(reader: R, delimiter: u8, input: &str) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => {
            let record = record.map_err(|source| IngestError::CsvParse {
                input: input.to_string(),
                source,
            })?;
            record.iter().map(normalize_header).collect()
        }
        None => {
            return Err(IngestError::EmptyCsv {
                input: input.to_string(),
            });
        }
    };
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            input: input.to_string(),
        });
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in records {
        let record = record.map_err(|source| IngestError::CsvParse {
            input: input.to_string(),
            source,
        })?;
        if record.len() > headers.len() {
            return Err(IngestError::RaggedRow {
                input: input.to_string(),
                line: record.position().map_or(0, csv::Position::line),
                expected: headers.len(),
                actual: record.len(),
            });
        }
        if record.iter().all(|value| value.trim().is_empty()) {
            skipped += 1;
            continue;
        }
        let mut row: Vec<String> = record.iter().map(normalize_cell).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    debug!(
        input = %input,
        columns = headers.len(),
        rows = rows.len(),
        skipped_blank = skipped,
        "table loaded"
    );

    Ok(CsvTable {
        input: input.to_string(),
        headers,
        rows,
    })
}
