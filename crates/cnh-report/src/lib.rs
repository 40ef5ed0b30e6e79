//! Output side of the course-completion ETL.
//!
//! - **assemble**: joined rows + run parameters → transaction-181 records
//! - **integrity**: leading-zero and width audit of the final table
//! - **export**: CSV writers and output file names
//! - **run_report**: JSON run summary
//! - **hash**: SHA-256 fingerprints of written files

pub mod assemble;
pub mod error;
pub mod export;
pub mod hash;
pub mod integrity;
pub mod run_report;

pub use assemble::assemble_records;
pub use error::{ReportError, Result};
pub use export::{
    FINAL_FILE_NAME, JOINED_COLUMNS, JOINED_FILE_NAME, RUN_REPORT_FILE_NAME,
    SHORT_DURATION_FILE_NAME, ensure_output_dir, write_final_csv, write_final_records,
    write_joined_csv, write_joined_records, write_short_duration_csv,
    write_short_duration_records,
};
pub use hash::{sha256_file, sha256_hex};
pub use integrity::check_integrity;
pub use run_report::{OutputFile, ReportParameters, RunReport, StageCounts, write_run_report};
