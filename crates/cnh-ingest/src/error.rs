//! Error types for table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a delimited table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file metadata or contents.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size accepted for a single upload.
    #[error("file {path} is too large ({size} bytes, limit {max_size})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV content (bad quoting, invalid UTF-8).
    #[error("failed to parse CSV {input}: {source}")]
    CsvParse {
        input: String,
        #[source]
        source: csv::Error,
    },

    /// No header row found.
    #[error("CSV input is empty: {input}")]
    EmptyCsv { input: String },

    /// A data row has more cells than the header.
    #[error("{input}: line {line} has {actual} fields, expected at most {expected}")]
    RaggedRow {
        input: String,
        line: u64,
        expected: usize,
        actual: usize,
    },

    // === Schema Errors ===
    /// Required column not present in the header.
    #[error("required column '{column}' not found in {input}")]
    MissingColumn { column: String, input: String },

    /// None of the accepted header variants is present.
    #[error("none of the expected columns was found in {input}; expected one of: {}", .aliases.join(", "))]
    NoMatchingAlias { aliases: Vec<String>, input: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");
    }

    #[test]
    fn alias_error_lists_every_alias() {
        let err = IngestError::NoMatchingAlias {
            aliases: vec!["A:".to_string(), "B:".to_string()],
            input: "form.csv".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "none of the expected columns was found in form.csv; expected one of: A:, B:"
        );
    }
}
