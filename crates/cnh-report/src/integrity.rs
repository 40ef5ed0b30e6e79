//! Post-assembly audit of the final table. Findings never alter data.

use cnh_model::{FIELD_LAYOUT, FinalRecord, IntegrityReport, LeadingZeroFinding, WidthOverflow};
use tracing::{info, warn};

/// Flags `codusu` values starting with `'0'` and values wider than their field.
pub fn check_integrity(records: &[FinalRecord]) -> IntegrityReport {
    let mut report = IntegrityReport::default();

    for (row, record) in records.iter().enumerate() {
        if record.user_code.starts_with('0') {
            report.leading_zero.push(LeadingZeroFinding {
                row,
                user_code: record.user_code.clone(),
            });
        }
        for (value, spec) in record.values().iter().zip(FIELD_LAYOUT.iter()) {
            let actual = value.chars().count();
            if let Some(width) = spec.expected_width().filter(|width| actual > *width) {
                report.width_overflows.push(WidthOverflow {
                    row,
                    field: spec.name,
                    width,
                    actual,
                });
            }
        }
    }

    if report.is_clean() {
        info!(records = records.len(), "integrity check passed");
    } else {
        warn!(
            leading_zero = report.leading_zero.len(),
            width_overflows = report.width_overflows.len(),
            "integrity check found issues"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnh_model::FIELD_COUNT;

    fn record(user_code: &str) -> FinalRecord {
        let mut values: [String; FIELD_COUNT] = Default::default();
        for (value, spec) in values.iter_mut().zip(FIELD_LAYOUT.iter()) {
            *value = spec.format("");
        }
        values[3] = user_code.to_string();
        FinalRecord::from_values(values)
    }

    #[test]
    fn leading_zero_is_flagged() {
        let report = check_integrity(&[record("01234567890"), record("12345678901")]);
        assert_eq!(
            report.leading_zero,
            vec![LeadingZeroFinding {
                row: 0,
                user_code: "01234567890".to_string(),
            }]
        );
        assert!(report.width_overflows.is_empty());
    }

    #[test]
    fn overflow_names_field() {
        let report = check_integrity(&[record("123456789012")]);
        assert_eq!(
            report.width_overflows,
            vec![WidthOverflow {
                row: 0,
                field: "codusu",
                width: 11,
                actual: 12,
            }]
        );
    }

    #[test]
    fn padded_license_number_is_not_an_overflow() {
        let mut clean = record("12345678901");
        clean.license_number = "00000012345".to_string();
        assert!(check_integrity(&[clean]).is_clean());

        let mut wide = record("12345678901");
        wide.license_number = "123456789012".to_string();
        assert_eq!(
            check_integrity(&[wide]).width_overflows,
            vec![WidthOverflow {
                row: 0,
                field: "numero-cnh",
                width: 11,
                actual: 12,
            }]
        );
    }

    #[test]
    fn empty_table_is_clean() {
        assert!(check_integrity(&[]).is_clean());
    }
}
