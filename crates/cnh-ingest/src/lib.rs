//! Table ingestion for the course-completion ETL.
//!
//! Inputs arrive as delimited UTF-8 text. Every cell is loaded as text so
//! identifiers keep their leading zeros; typed parsing happens in the
//! transform stages.

mod columns;
mod csv_table;
mod error;

pub use columns::{ResolvedColumn, resolve_column};
pub use csv_table::{
    CsvTable, MAX_CSV_FILE_SIZE, check_file_size_with_limit, parse_csv_table, read_csv_table,
};
pub use error::{IngestError, Result};
