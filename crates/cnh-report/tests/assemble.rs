//! Record assembly, integrity audit and file export on a small joined table.

use chrono::NaiveDate;
use cnh_model::{FIELD_LAYOUT, JoinedRecord, RunParameters};
use cnh_report::{
    FINAL_FILE_NAME, SHORT_DURATION_FILE_NAME, assemble_records, check_integrity,
    ensure_output_dir, sha256_file, sha256_hex, write_final_csv, write_final_records,
};

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
}

fn joined(identifier: &str, start: &str) -> JoinedRecord {
    JoinedRecord {
        identifier_original: identifier.to_string(),
        identifier: identifier.to_string(),
        start_date_code: start.to_string(),
        end_date_code: start.to_string(),
        license_number: "12345".to_string(),
        license_category: "D   ".to_string(),
    }
}

fn three_rows() -> Vec<JoinedRecord> {
    vec![
        joined("11111111111", "20200115"),
        joined("22222222222", ""),
        joined("33333333333", "20240229"),
    ]
}

#[test]
fn sequence_and_certificates_follow_row_order() {
    let records = assemble_records(&three_rows(), &RunParameters::new(run_date()));
    let sequences: Vec<_> = records.iter().map(|r| r.sequence_number.as_str()).collect();
    assert_eq!(sequences, vec!["888888", "888889", "888890"]);
    let certificates: Vec<_> = records
        .iter()
        .map(|r| r.certificate_number.as_str())
        .collect();
    assert_eq!(
        certificates,
        vec!["escola000000001", "escola000000002", "escola000000003"]
    );
}

#[test]
fn validity_is_five_years_after_start() {
    let records = assemble_records(&three_rows(), &RunParameters::new(run_date()));
    assert_eq!(records[0].validity_date, "20250115");
    assert_eq!(records[1].validity_date, "        ");
    assert_eq!(records[2].validity_date, "20290228");
    assert_eq!(records[0].julian_day, "366");
}

#[test]
fn every_field_has_its_declared_width() {
    let records = assemble_records(&three_rows(), &RunParameters::new(run_date()));
    for record in &records {
        for (value, spec) in record.values().iter().zip(FIELD_LAYOUT.iter()) {
            // numero-cnh keeps the 11 digits it was padded to before formatting
            if spec.name == "numero-cnh" {
                assert_eq!(value.len(), 11);
                continue;
            }
            if let Some(width) = spec.width {
                assert_eq!(value.chars().count(), width, "field {}", spec.name);
            }
        }
    }
}

#[test]
fn clean_rows_pass_integrity() {
    let records = assemble_records(&three_rows(), &RunParameters::new(run_date()));
    assert!(records.iter().all(|r| r.license_number == "00000012345"));
    let report = check_integrity(&records);
    assert!(report.is_clean());
}

#[test]
fn reassembly_is_byte_identical() {
    let params = RunParameters::new(run_date());
    let render = || {
        let mut out = Vec::new();
        write_final_records(&mut out, &assemble_records(&three_rows(), &params)).unwrap();
        out
    };
    assert_eq!(sha256_hex(&render()), sha256_hex(&render()));
}

#[test]
fn final_csv_written_to_nested_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("saida").join("lote");
    ensure_output_dir(&output_dir).unwrap();
    let path = output_dir.join(FINAL_FILE_NAME);
    let records = assemble_records(&three_rows(), &RunParameters::new(run_date()));
    write_final_csv(&path, &records).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert_eq!(sha256_file(&path).unwrap(), sha256_hex(text.as_bytes()));
    assert!(!output_dir.join(SHORT_DURATION_FILE_NAME).exists());
}
