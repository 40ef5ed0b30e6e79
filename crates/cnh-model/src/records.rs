//! Row-level records flowing between pipeline stages.

use chrono::NaiveDate;
use serde::Serialize;

/// Identifier column of the course report.
pub const COURSE_IDENTIFIER_COLUMN: &str = "CPF";
/// Enrollment date column of the course report (DD/MM/YYYY).
pub const ENROLLMENT_DATE_COLUMN: &str = "Data de matrícula";
/// Completion date column of the course report (DD/MM/YYYY).
pub const COMPLETION_DATE_COLUMN: &str = "Data de conclusão";
/// Column appended to exports holding the identifier as received.
pub const ORIGINAL_IDENTIFIER_COLUMN: &str = "CPF_Original";
/// Column appended to the short-duration export.
pub const DURATION_COLUMN: &str = "Diferença de Dias";

/// Identifier column of the registration form.
pub const REGISTRATION_IDENTIFIER_COLUMN: &str = "Identificação de usuário";
/// Header variants for the license number, in priority order.
pub const LICENSE_NUMBER_ALIASES: [&str; 2] = [
    "QUESTÃO 1 - Informe o número da CNH:",
    "Nº Registro da CNH:",
];
/// Header variants for the license category, in priority order.
pub const LICENSE_CATEGORY_ALIASES: [&str; 2] = [
    "QUESTÃO 2 - Selecione a categoria da CNH:",
    "Categoria da CNH:",
];

/// Courses completed in fewer days than this are flagged as short.
pub const SHORT_DURATION_THRESHOLD_DAYS: i64 = 5;

/// One row of the course-completion report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    /// Digits-only identifier used as the join key.
    pub identifier: String,
    /// Identifier exactly as it appeared in the source.
    pub identifier_original: String,
    pub enrollment_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    /// `YYYYMMDD`, empty when the enrollment date did not parse.
    pub start_date_code: String,
    /// `YYYYMMDD`, empty when the completion date did not parse.
    pub end_date_code: String,
    /// Every source cell, in header order.
    pub source: Vec<String>,
}

impl CourseRecord {
    /// Whole days between enrollment and completion, if both dates parsed.
    pub fn duration_days(&self) -> Option<i64> {
        match (self.enrollment_date, self.completion_date) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }
}

/// A course row completed under the duration threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortDurationRecord {
    pub record: CourseRecord,
    pub duration_days: i64,
}

/// Short-duration rows plus the source layout needed to export them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortDurationTable {
    pub headers: Vec<String>,
    pub enrollment_column: usize,
    pub completion_column: usize,
    pub rows: Vec<ShortDurationRecord>,
}

impl ShortDurationTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row of the registration form after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub identifier: String,
    /// Digits only.
    pub license_number: String,
    /// Right-padded with spaces to four characters.
    pub license_category: String,
}

/// A course row matched to a registration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedRecord {
    #[serde(rename = "CPF_Original")]
    pub identifier_original: String,
    #[serde(rename = "CPF")]
    pub identifier: String,
    #[serde(rename = "data-inicio-curso")]
    pub start_date_code: String,
    #[serde(rename = "data-fim-curso")]
    pub end_date_code: String,
    #[serde(rename = "numero-cnh")]
    pub license_number: String,
    #[serde(rename = "categoria")]
    pub license_category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(start: Option<(i32, u32, u32)>, end: Option<(i32, u32, u32)>) -> CourseRecord {
        let to_date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        CourseRecord {
            identifier: "1".to_string(),
            identifier_original: "1".to_string(),
            enrollment_date: start.map(to_date),
            completion_date: end.map(to_date),
            start_date_code: String::new(),
            end_date_code: String::new(),
            source: Vec::new(),
        }
    }

    #[test]
    fn duration_counts_whole_days() {
        let course = record(Some((2024, 1, 1)), Some((2024, 2, 1)));
        assert_eq!(course.duration_days(), Some(31));
    }

    #[test]
    fn duration_can_be_negative() {
        let course = record(Some((2024, 1, 10)), Some((2024, 1, 1)));
        assert_eq!(course.duration_days(), Some(-9));
    }

    #[test]
    fn duration_undefined_without_both_dates() {
        assert_eq!(record(None, Some((2024, 1, 1))).duration_days(), None);
        assert_eq!(record(Some((2024, 1, 1)), None).duration_days(), None);
    }
}
