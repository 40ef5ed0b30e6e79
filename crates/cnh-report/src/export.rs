//! CSV writers for the short-duration, joined and final tables.
//!
//! All exports are comma-delimited with a header row and minimal quoting.
//! The writer-level functions work on any [`Write`]; the path-level ones
//! create the file and attach the path to errors.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use cnh_model::records::{DURATION_COLUMN, ORIGINAL_IDENTIFIER_COLUMN};
use cnh_model::{FIELD_LAYOUT, FinalRecord, JoinedRecord, ShortDurationTable};
use cnh_transform::dates::format_iso_date;
use tracing::debug;

use crate::error::{ReportError, Result};

/// Rows completed in under five days.
pub const SHORT_DURATION_FILE_NAME: &str = "ALUNOS_CURSO_MENOS_5.csv";
/// Intermediate joined table.
pub const JOINED_FILE_NAME: &str = "PREPARO_ETL.csv";
/// Transaction-181 records.
pub const FINAL_FILE_NAME: &str = "PREPARO_ETL_FINAL.csv";
/// Machine-readable run summary.
pub const RUN_REPORT_FILE_NAME: &str = "run_report.json";

/// Header of the joined table.
pub const JOINED_COLUMNS: [&str; 6] = [
    ORIGINAL_IDENTIFIER_COLUMN,
    "CPF",
    "data-inicio-curso",
    "data-fim-curso",
    "numero-cnh",
    "categoria",
];

pub fn write_final_records<W: Write>(writer: W, records: &[FinalRecord]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(FIELD_LAYOUT.iter().map(|spec| spec.name))?;
    for record in records {
        writer.write_record(record.values())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_joined_records<W: Write>(writer: W, records: &[JoinedRecord]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(JOINED_COLUMNS)?;
    for record in records {
        writer.write_record([
            record.identifier_original.as_str(),
            record.identifier.as_str(),
            record.start_date_code.as_str(),
            record.end_date_code.as_str(),
            record.license_number.as_str(),
            record.license_category.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes every source column (dates as `YYYY-MM-DD`), then the original
/// identifier and the duration in days.
pub fn write_short_duration_records<W: Write>(
    writer: W,
    table: &ShortDurationTable,
) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut header: Vec<&str> = table.headers.iter().map(String::as_str).collect();
    header.push(ORIGINAL_IDENTIFIER_COLUMN);
    header.push(DURATION_COLUMN);
    writer.write_record(&header)?;

    for short in &table.rows {
        let record = &short.record;
        let mut row: Vec<String> = (0..table.headers.len())
            .map(|col| record.source.get(col).cloned().unwrap_or_default())
            .collect();
        if let Some(cell) = row.get_mut(table.enrollment_column) {
            *cell = format_iso_date(record.enrollment_date);
        }
        if let Some(cell) = row.get_mut(table.completion_column) {
            *cell = format_iso_date(record.completion_date);
        }
        row.push(record.identifier_original.clone());
        row.push(short.duration_days.to_string());
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Creates `dir` and any missing parents.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

pub fn write_final_csv(path: &Path, records: &[FinalRecord]) -> Result<()> {
    write_csv_file(path, |file| write_final_records(file, records))
}

pub fn write_joined_csv(path: &Path, records: &[JoinedRecord]) -> Result<()> {
    write_csv_file(path, |file| write_joined_records(file, records))
}

pub fn write_short_duration_csv(path: &Path, table: &ShortDurationTable) -> Result<()> {
    write_csv_file(path, |file| write_short_duration_records(file, table))
}

fn write_csv_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(File) -> csv::Result<()>,
{
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write(file).map_err(|source| ReportError::CsvWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "wrote CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnh_model::{CourseRecord, ShortDurationRecord};

    fn to_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn joined_header_and_row() {
        let mut out = Vec::new();
        write_joined_records(
            &mut out,
            &[JoinedRecord {
                identifier_original: "012.345.678-90".to_string(),
                identifier: "01234567890".to_string(),
                start_date_code: "20240101".to_string(),
                end_date_code: String::new(),
                license_number: "99".to_string(),
                license_category: "B   ".to_string(),
            }],
        )
        .unwrap();
        assert_eq!(
            to_text(out),
            "CPF_Original,CPF,data-inicio-curso,data-fim-curso,numero-cnh,categoria\n\
             012.345.678-90,01234567890,20240101,,99,B   \n"
        );
    }

    #[test]
    fn short_duration_rewrites_dates_and_appends_columns() {
        let table = ShortDurationTable {
            headers: vec![
                "Nome".to_string(),
                "CPF".to_string(),
                "Data de matrícula".to_string(),
                "Data de conclusão".to_string(),
            ],
            enrollment_column: 2,
            completion_column: 3,
            rows: vec![ShortDurationRecord {
                record: CourseRecord {
                    identifier: "123".to_string(),
                    identifier_original: "1.2.3".to_string(),
                    enrollment_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
                    completion_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 3),
                    start_date_code: "20240101".to_string(),
                    end_date_code: "20240103".to_string(),
                    source: vec![
                        "Silva, Ana".to_string(),
                        "1.2.3".to_string(),
                        "01/01/2024".to_string(),
                        "03/01/2024".to_string(),
                    ],
                },
                duration_days: 2,
            }],
        };
        let mut out = Vec::new();
        write_short_duration_records(&mut out, &table).unwrap();
        assert_eq!(
            to_text(out),
            "Nome,CPF,Data de matrícula,Data de conclusão,CPF_Original,Diferença de Dias\n\
             \"Silva, Ana\",1.2.3,2024-01-01,2024-01-03,1.2.3,2\n"
        );
    }

    #[test]
    fn final_table_without_rows_has_header() {
        let mut out = Vec::new();
        write_final_records(&mut out, &[]).unwrap();
        let text = to_text(out);
        assert!(text.starts_with("nu-seq-trans,cod-trans,cod-mod-trans,codusu,"));
        assert!(text.ends_with("categoria,observacoes-curso\n"));
    }
}
