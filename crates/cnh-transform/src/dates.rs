//! Calendar parsing and formatting used by the course and assembly stages.
//!
//! Source reports write dates as `DD/MM/YYYY`; the transaction record wants
//! `YYYYMMDD`. Anything unparseable becomes `None` and later an empty string.

use chrono::{Datelike, Months, NaiveDate};

/// Source date pattern of the course report.
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses `DD/MM/YYYY`; `None` for empty or malformed values.
pub fn parse_report_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, REPORT_DATE_FORMAT).ok()
}

/// `YYYYMMDD`, or an empty string when there is no date.
pub fn format_date_code(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y%m%d").to_string())
        .unwrap_or_default()
}

/// `YYYY-MM-DD`, or an empty string when there is no date.
pub fn format_iso_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Parses an eight-digit `YYYYMMDD` code.
pub fn parse_date_code(code: &str) -> Option<NaiveDate> {
    let code = code.trim();
    if code.len() != 8 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = code[0..4].parse::<i32>().ok()?;
    let month = code[4..6].parse::<u32>().ok()?;
    let day = code[6..8].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Adds whole calendar years, clamping Feb 29 to Feb 28 on non-leap targets.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(years.checked_mul(12)?))
}

/// Start code plus `years`, as `YYYYMMDD`; empty when the start is not a date.
pub fn validity_date_code(start_code: &str, years: u32) -> String {
    format_date_code(parse_date_code(start_code).and_then(|start| add_years(start, years)))
}

/// One-based day of the year (1–366).
pub fn julian_day(date: NaiveDate) -> u32 {
    date.ordinal()
}
