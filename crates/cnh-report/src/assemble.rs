//! Builds transaction-181 records from joined rows and run parameters.

use cnh_model::layout::{
    CERTIFICATE_ORDINAL_WIDTH, CERTIFICATE_PREFIX, COURSE_CODE, COURSE_MODALITY,
    COURSE_MUNICIPALITY, COURSE_NOTES, COURSE_STATE, DESTINATION_STATE, ENTITY_CNPJ, EVENT_TYPE,
    INSTRUCTOR_CPF, KEY_TYPE, LICENSE_NUMBER_JOIN_WIDTH, ORIGIN_STATE, RETURN_CODE,
    SENDER_STATE, TRANSACTION_CODE, TRANSACTION_CONDITION, TRANSACTION_MODE, TRANSACTION_SIZE,
    VALIDITY_YEARS,
};
use cnh_model::{FIELD_COUNT, FIELD_LAYOUT, FinalRecord, JoinedRecord, RunParameters, zero_pad};
use cnh_transform::dates::{julian_day, validity_date_code};
use tracing::{info, info_span};

/// Assembles one final record per joined row, in input order.
///
/// Row `i` gets sequence number `starting_sequence_number + i` and certificate
/// ordinal `i + 1`. Every value is then padded according to
/// [`FIELD_LAYOUT`]; padding never truncates.
pub fn assemble_records(joined: &[JoinedRecord], params: &RunParameters) -> Vec<FinalRecord> {
    let span = info_span!(
        "assembly",
        rows = joined.len(),
        start = params.starting_sequence_number,
        update_type = params.update_type.code(),
        course_hours = params.course_hours.code()
    );
    let _guard = span.enter();

    let julian = julian_day(params.run_date).to_string();
    let records: Vec<FinalRecord> = joined
        .iter()
        .enumerate()
        .map(|(index, row)| assemble_record(index, row, params, &julian))
        .collect();

    info!(records = records.len(), "final records assembled");
    records
}

fn assemble_record(
    index: usize,
    row: &JoinedRecord,
    params: &RunParameters,
    julian_day: &str,
) -> FinalRecord {
    let sequence = params
        .starting_sequence_number
        .saturating_add(index as u64);
    let certificate = format!(
        "{CERTIFICATE_PREFIX}{:0width$}",
        index + 1,
        width = CERTIFICATE_ORDINAL_WIDTH
    );

    let mut values: [String; FIELD_COUNT] = [
        sequence.to_string(),
        TRANSACTION_CODE.to_string(),
        TRANSACTION_MODE.to_string(),
        row.identifier.clone(),
        ORIGIN_STATE.to_string(),
        SENDER_STATE.to_string(),
        DESTINATION_STATE.to_string(),
        TRANSACTION_CONDITION.to_string(),
        TRANSACTION_SIZE.to_string(),
        RETURN_CODE.to_string(),
        julian_day.to_string(),
        KEY_TYPE.to_string(),
        zero_pad(&row.license_number, LICENSE_NUMBER_JOIN_WIDTH),
        EVENT_TYPE.to_string(),
        params.update_type.code().to_string(),
        COURSE_CODE.to_string(),
        COURSE_MODALITY.to_string(),
        certificate,
        row.start_date_code.clone(),
        row.end_date_code.clone(),
        params.course_hours.code().to_string(),
        ENTITY_CNPJ.to_string(),
        INSTRUCTOR_CPF.to_string(),
        COURSE_MUNICIPALITY.to_string(),
        COURSE_STATE.to_string(),
        validity_date_code(&row.start_date_code, VALIDITY_YEARS),
        row.license_category.clone(),
        COURSE_NOTES.to_string(),
    ];
    for (value, spec) in values.iter_mut().zip(FIELD_LAYOUT.iter()) {
        *value = spec.format(value);
    }
    FinalRecord::from_values(values)
}
