//! Stage orchestration with soft failures.
//!
//! Stages never abort the run. A failing stage contributes an empty result and
//! an error [`StageMessage`]; downstream stages see "no data" and report why
//! they did nothing.

use std::path::Path;

use cnh_ingest::{CsvTable, IngestError, read_csv_table};
use cnh_model::{
    FinalRecord, IntegrityReport, JoinedRecord, RegistrationRecord, RunParameters, Severity,
    Stage, StageMessage,
};
use cnh_report::{assemble_records, check_integrity};
use cnh_transform::{
    COURSE_REPORT_DELIMITER, CourseReport, REGISTRATION_DELIMITER, TransformError,
    join_and_select, transform_course_report, transform_registration,
};
use tracing::{error, info_span, trace, warn};

use crate::logging::redact_value;

/// Everything one run produced, including empty results of failed stages.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    /// Data rows read from the course report.
    pub course_rows: usize,
    pub course: CourseReport,
    pub registrations: Vec<RegistrationRecord>,
    pub joined: Vec<JoinedRecord>,
    pub records: Vec<FinalRecord>,
    pub integrity: IntegrityReport,
    pub messages: Vec<StageMessage>,
}

impl PipelineOutput {
    pub fn has_final_table(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|message| message.severity == Severity::Error)
    }
}

/// Runs every stage on the two input files.
pub fn run_pipeline(
    course_path: &Path,
    registration_path: &Path,
    params: &RunParameters,
) -> PipelineOutput {
    let course_table = read_csv_table(course_path, COURSE_REPORT_DELIMITER);
    let registration_table = read_csv_table(registration_path, REGISTRATION_DELIMITER);
    run_pipeline_on_tables(course_table, registration_table, params)
}

/// Runs every stage on already loaded tables; load failures count as stage failures.
pub fn run_pipeline_on_tables(
    course_table: Result<CsvTable, IngestError>,
    registration_table: Result<CsvTable, IngestError>,
    params: &RunParameters,
) -> PipelineOutput {
    let mut output = PipelineOutput::default();

    course_stage(course_table, &mut output);
    registration_stage(registration_table, &mut output);
    join_stage(&mut output);
    if output.joined.is_empty() {
        output.messages.push(StageMessage::warning(
            Stage::Assembly,
            "no final table could be built; check the input files and join conditions",
        ));
        return output;
    }

    output.records = assemble_records(&output.joined, params);
    output.messages.push(StageMessage::notice(
        Stage::Assembly,
        format!("{} final records assembled", output.records.len()),
    ));
    integrity_stage(&mut output);
    output
}

fn course_stage(table: Result<CsvTable, IngestError>, output: &mut PipelineOutput) {
    let span = info_span!("course_stage");
    let _guard = span.enter();

    let result = table
        .map_err(|source| TransformError::CourseReport { source })
        .and_then(|table| {
            output.course_rows = table.len();
            transform_course_report(&table)
        });
    let report = match result {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "course report stage failed");
            output
                .messages
                .push(StageMessage::error(Stage::CourseReport, stage_error_text(&err)));
            return;
        }
    };

    if report.short_duration.is_empty() {
        output.messages.push(StageMessage::notice(
            Stage::CourseReport,
            "no rows completed in under 5 days",
        ));
    } else {
        output.messages.push(StageMessage::notice(
            Stage::CourseReport,
            format!(
                "{} rows completed in under 5 days are available for export",
                report.short_duration.len()
            ),
        ));
    }
    if report.undated > 0 {
        warn!(rows = report.undated, "rows without a computable duration kept");
        output.messages.push(StageMessage::warning(
            Stage::CourseReport,
            format!(
                "{} rows have an unparseable enrollment or completion date and were kept",
                report.undated
            ),
        ));
    }
    output.course = report;
}

fn registration_stage(table: Result<CsvTable, IngestError>, output: &mut PipelineOutput) {
    let span = info_span!("registration_stage");
    let _guard = span.enter();

    let result = table
        .map_err(|source| TransformError::Registration { source })
        .and_then(|table| transform_registration(&table));
    match result {
        Ok(records) => output.registrations = records,
        Err(err) => {
            error!(error = %err, "registration stage failed");
            output
                .messages
                .push(StageMessage::error(Stage::Registration, stage_error_text(&err)));
        }
    }
}

fn join_stage(output: &mut PipelineOutput) {
    let courses_empty = output.course.main.is_empty();
    let registrations_empty = output.registrations.is_empty();
    if courses_empty || registrations_empty {
        let side = match (courses_empty, registrations_empty) {
            (true, true) => "both tables are",
            (true, false) => "the course report is",
            _ => "the registration form is",
        };
        warn!(courses_empty, registrations_empty, "join skipped");
        output.messages.push(StageMessage::warning(
            Stage::Join,
            format!("{side} empty after processing; nothing to join"),
        ));
        return;
    }

    output.joined = join_and_select(&output.course.main, &output.registrations);
    if output.joined.is_empty() {
        warn!("no course row matched a registration");
        output.messages.push(StageMessage::warning(
            Stage::Join,
            "no course row matched a registration by CPF",
        ));
    } else {
        output.messages.push(StageMessage::notice(
            Stage::Join,
            format!("{} rows joined", output.joined.len()),
        ));
    }
}

fn integrity_stage(output: &mut PipelineOutput) {
    output.integrity = check_integrity(&output.records);
    for finding in &output.integrity.leading_zero {
        trace!(
            row = finding.row,
            codusu = redact_value(&finding.user_code),
            "codusu starts with '0'"
        );
    }
    let leading_zero = output.integrity.leading_zero.len();
    if leading_zero == 0 {
        output.messages.push(StageMessage::notice(
            Stage::Integrity,
            "no codusu value starts with '0'",
        ));
    } else {
        output.messages.push(StageMessage::warning(
            Stage::Integrity,
            format!("{leading_zero} codusu values start with '0'"),
        ));
    }
    let overflows = output.integrity.width_overflows.len();
    if overflows > 0 {
        output.messages.push(StageMessage::warning(
            Stage::Integrity,
            format!("{overflows} values are wider than their declared field"),
        ));
    }
}

/// The stage is already named by the message, so only the cause is kept.
fn stage_error_text(err: &TransformError) -> String {
    match err {
        TransformError::CourseReport { source } | TransformError::Registration { source } => {
            source.to_string()
        }
    }
}
