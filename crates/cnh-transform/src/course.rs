//! Course-completion report transform.
//!
//! Splits the report into rows completed suspiciously fast and rows that
//! continue to the join, and derives the `YYYYMMDD` date codes.

use cnh_ingest::CsvTable;
use cnh_model::records::{
    COMPLETION_DATE_COLUMN, COURSE_IDENTIFIER_COLUMN, ENROLLMENT_DATE_COLUMN,
    SHORT_DURATION_THRESHOLD_DAYS,
};
use cnh_model::{CourseRecord, ShortDurationRecord, ShortDurationTable};
use tracing::{debug, info, info_span};

use crate::dates::{format_date_code, parse_report_date};
use crate::error::{Result, TransformError};
use crate::identifier::normalize_identifier;

/// Field separator of the course report.
pub const COURSE_REPORT_DELIMITER: u8 = b';';

/// Output of the course-report stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseReport {
    /// Rows that continue to the join.
    pub main: Vec<CourseRecord>,
    /// Rows completed in under [`SHORT_DURATION_THRESHOLD_DAYS`] days.
    pub short_duration: ShortDurationTable,
    /// Rows in `main` whose duration could not be computed.
    pub undated: usize,
}

#[derive(Debug, Clone, Copy)]
struct CourseColumns {
    identifier: usize,
    enrollment: usize,
    completion: usize,
}

impl CourseColumns {
    fn locate(table: &CsvTable) -> Result<Self> {
        let locate = |name: &str| {
            table
                .require_column(name)
                .map_err(|source| TransformError::CourseReport { source })
        };
        Ok(Self {
            identifier: locate(COURSE_IDENTIFIER_COLUMN)?,
            enrollment: locate(ENROLLMENT_DATE_COLUMN)?,
            completion: locate(COMPLETION_DATE_COLUMN)?,
        })
    }
}

/// Transforms the parsed course report.
///
/// A row whose duration is undefined (either date unparseable) does not count
/// as short and stays in `main`.
pub fn transform_course_report(table: &CsvTable) -> Result<CourseReport> {
    let span = info_span!("course_report", input = %table.input, rows = table.len());
    let _guard = span.enter();

    let columns = CourseColumns::locate(table)?;
    let mut report = CourseReport {
        short_duration: ShortDurationTable {
            headers: table.headers.clone(),
            enrollment_column: columns.enrollment,
            completion_column: columns.completion,
            rows: Vec::new(),
        },
        ..CourseReport::default()
    };

    for (row_idx, cells) in table.rows.iter().enumerate() {
        let identifier_original = table.cell(row_idx, columns.identifier).to_string();
        let enrollment_date = parse_report_date(table.cell(row_idx, columns.enrollment));
        let completion_date = parse_report_date(table.cell(row_idx, columns.completion));
        let record = CourseRecord {
            identifier: normalize_identifier(&identifier_original),
            identifier_original,
            enrollment_date,
            completion_date,
            start_date_code: format_date_code(enrollment_date),
            end_date_code: format_date_code(completion_date),
            source: cells.clone(),
        };

        match record.duration_days() {
            Some(days) if days < SHORT_DURATION_THRESHOLD_DAYS => {
                debug!(row = row_idx, duration_days = days, "short-duration row");
                report.short_duration.rows.push(ShortDurationRecord {
                    record,
                    duration_days: days,
                });
            }
            Some(_) => report.main.push(record),
            None => {
                report.undated += 1;
                report.main.push(record);
            }
        }
    }

    info!(
        main = report.main.len(),
        short_duration = report.short_duration.len(),
        undated = report.undated,
        "course report transformed"
    );
    Ok(report)
}
