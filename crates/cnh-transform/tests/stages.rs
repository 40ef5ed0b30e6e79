//! Course, registration and join stages chained on in-memory tables.

use cnh_ingest::{CsvTable, parse_csv_table};
use cnh_transform::{
    COURSE_REPORT_DELIMITER, REGISTRATION_DELIMITER, join_and_select, transform_course_report,
    transform_registration,
};

fn course_table(rows: &[&str]) -> CsvTable {
    let mut text = String::from("Nome;CPF;Data de matrícula;Data de conclusão\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    parse_csv_table(text.as_bytes(), COURSE_REPORT_DELIMITER, "curso.csv").unwrap()
}

fn registration_table(rows: &[&str]) -> CsvTable {
    let mut text =
        String::from("Identificação de usuário,Nº Registro da CNH:,Categoria da CNH:\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    parse_csv_table(text.as_bytes(), REGISTRATION_DELIMITER, "cadastro.csv").unwrap()
}

#[test]
fn two_day_course_goes_to_short_output_only() {
    let report =
        transform_course_report(&course_table(&["Ana;123;01/01/2024;03/01/2024"])).unwrap();
    assert!(report.main.is_empty());
    assert_eq!(report.short_duration.len(), 1);
    let short = &report.short_duration.rows[0];
    assert_eq!(short.duration_days, 2);
    assert_eq!(short.record.source[0], "Ana");
}

#[test]
fn thirty_one_day_course_continues_with_codes() {
    let report =
        transform_course_report(&course_table(&["Ana;123;01/01/2024;01/02/2024"])).unwrap();
    assert!(report.short_duration.is_empty());
    assert_eq!(report.main.len(), 1);
    assert_eq!(report.main[0].start_date_code, "20240101");
    assert_eq!(report.main[0].end_date_code, "20240201");
}

#[test]
fn original_identifier_is_preserved() {
    let report =
        transform_course_report(&course_table(&["Ana;012.345.678-90;01/01/2024;01/02/2024"]))
            .unwrap();
    assert_eq!(report.main[0].identifier, "01234567890");
    assert_eq!(report.main[0].identifier_original, "012.345.678-90");
}

#[test]
fn matching_identifier_joins_once() {
    let report =
        transform_course_report(&course_table(&["Ana;123;01/01/2024;01/02/2024"])).unwrap();
    let registrations = transform_registration(&registration_table(&["123,555,B"])).unwrap();
    let joined = join_and_select(&report.main, &registrations);
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].identifier, "123");
    assert_eq!(joined[0].license_number, "555");
    assert_eq!(joined[0].license_category, "B   ");
}

#[test]
fn unmatched_identifier_is_dropped_silently() {
    let report =
        transform_course_report(&course_table(&["Ana;999;01/01/2024;01/02/2024"])).unwrap();
    let registrations = transform_registration(&registration_table(&["123,555,B"])).unwrap();
    assert!(join_and_select(&report.main, &registrations).is_empty());
}

#[test]
fn join_keeps_course_order() {
    let report = transform_course_report(&course_table(&[
        "C;3;01/01/2024;01/02/2024",
        "A;1;01/01/2024;01/02/2024",
        "B;2;01/01/2024;01/02/2024",
    ]))
    .unwrap();
    let registrations =
        transform_registration(&registration_table(&["1,11,A", "2,22,B", "3,33,C"])).unwrap();
    let joined = join_and_select(&report.main, &registrations);
    let ids: Vec<_> = joined.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
}

#[test]
fn formatted_identifiers_join_with_plain_ones() {
    let report =
        transform_course_report(&course_table(&["Ana;123.456.789-01;01/01/2024;01/02/2024"]))
            .unwrap();
    let registrations =
        transform_registration(&registration_table(&["\"12345678901\",1,AB"])).unwrap();
    assert_eq!(join_and_select(&report.main, &registrations).len(), 1);
}
