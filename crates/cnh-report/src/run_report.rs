//! JSON summary of one pipeline run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use cnh_model::{IntegrityReport, RunParameters, StageMessage};
use cnh_transform::dates::format_iso_date;
use serde::Serialize;

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub parameters: ReportParameters,
    pub counts: StageCounts,
    pub messages: Vec<StageMessage>,
    pub integrity: IntegrityReport,
    pub outputs: Vec<OutputFile>,
}

/// Run parameters as written to the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportParameters {
    pub starting_sequence_number: u64,
    pub update_type: &'static str,
    pub course_hours: &'static str,
    /// `YYYY-MM-DD`.
    pub run_date: String,
}

impl From<&RunParameters> for ReportParameters {
    fn from(params: &RunParameters) -> Self {
        Self {
            starting_sequence_number: params.starting_sequence_number,
            update_type: params.update_type.code(),
            course_hours: params.course_hours.code(),
            run_date: format_iso_date(Some(params.run_date)),
        }
    }
}

/// Row counts after each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    pub course_rows: usize,
    pub short_duration: usize,
    pub undated: usize,
    pub registrations: usize,
    pub joined: usize,
    pub final_records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub name: &'static str,
    pub path: PathBuf,
    pub rows: usize,
    pub sha256: String,
}

/// Writes `report` as pretty-printed JSON followed by a newline.
pub fn write_run_report(path: &Path, report: &RunReport) -> Result<()> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cnh_model::{CourseHours, Stage};

    #[test]
    fn parameters_use_wire_codes() {
        let params = RunParameters::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .with_course_hours(CourseHours::Hours40);
        let written = ReportParameters::from(&params);
        assert_eq!(written.update_type, "I");
        assert_eq!(written.course_hours, "040");
        assert_eq!(written.run_date, "2024-03-01");
    }

    #[test]
    fn report_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_report.json");
        let report = RunReport {
            parameters: ReportParameters::from(&RunParameters::new(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            )),
            counts: StageCounts {
                joined: 2,
                ..StageCounts::default()
            },
            messages: vec![StageMessage::notice(Stage::Join, "2 rows joined")],
            integrity: IntegrityReport::default(),
            outputs: Vec::new(),
        };
        write_run_report(&path, &report).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["counts"]["joined"], 2);
        assert_eq!(value["messages"][0]["stage"], "join");
        assert_eq!(value["parameters"]["starting_sequence_number"], 888_888);
    }
}
