use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use cnh_model::{IntegrityReport, LeadingZeroFinding, RunParameters};
use cnh_report::{
    FINAL_FILE_NAME, JOINED_FILE_NAME, OutputFile, RUN_REPORT_FILE_NAME, ReportParameters,
    RunReport, SHORT_DURATION_FILE_NAME, StageCounts, ensure_output_dir, sha256_file,
    write_final_csv, write_joined_csv, write_run_report, write_short_duration_csv,
};

use crate::logging::redact_value;
use crate::pipeline::{PipelineOutput, run_pipeline};
use crate::types::RunResult;

/// File-level options of a run; the record-level ones live in [`RunParameters`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub course_report: PathBuf,
    pub registration_form: PathBuf,
    pub output_dir: PathBuf,
    /// Also write the intermediate joined table.
    pub write_joined: bool,
    /// Run every stage but write nothing.
    pub dry_run: bool,
    pub report_json: bool,
}

pub fn run_etl(options: &RunOptions, params: RunParameters) -> Result<RunResult> {
    let span = info_span!(
        "run",
        course_report = %options.course_report.display(),
        registration_form = %options.registration_form.display(),
        run_date = %params.run_date
    );
    let _guard = span.enter();

    let pipeline = run_pipeline(&options.course_report, &options.registration_form, &params);
    if options.dry_run {
        info!("dry run: no files written");
        return Ok(RunResult {
            params,
            output_dir: None,
            pipeline,
            outputs: Vec::new(),
            removed: Vec::new(),
            run_report: None,
        });
    }

    let output_dir = &options.output_dir;
    ensure_output_dir(output_dir).context("prepare output directory")?;
    let (outputs, removed) = write_outputs(output_dir, &pipeline, options.write_joined)?;

    let run_report = if options.report_json {
        let path = output_dir.join(RUN_REPORT_FILE_NAME);
        let report = build_run_report(&params, &pipeline, &outputs);
        write_run_report(&path, &report).context("write run report")?;
        Some(path)
    } else {
        None
    };

    info!(files = outputs.len(), "outputs written");
    Ok(RunResult {
        params,
        output_dir: Some(output_dir.clone()),
        pipeline,
        outputs,
        removed,
        run_report,
    })
}

/// Writes every non-empty output. An output this run owns but did not
/// produce is deleted, so the directory never mixes runs.
fn write_outputs(
    output_dir: &Path,
    pipeline: &PipelineOutput,
    write_joined: bool,
) -> Result<(Vec<OutputFile>, Vec<PathBuf>)> {
    let mut outputs = Vec::new();
    let mut removed = Vec::new();

    let short_duration = &pipeline.course.short_duration;
    let path = output_dir.join(SHORT_DURATION_FILE_NAME);
    if !short_duration.is_empty() {
        write_short_duration_csv(&path, short_duration).context("write short-duration table")?;
        outputs.push(output_file(SHORT_DURATION_FILE_NAME, path, short_duration.len())?);
    } else if remove_stale(&path)? {
        removed.push(path);
    }

    if write_joined {
        let path = output_dir.join(JOINED_FILE_NAME);
        if !pipeline.joined.is_empty() {
            write_joined_csv(&path, &pipeline.joined).context("write joined table")?;
            outputs.push(output_file(JOINED_FILE_NAME, path, pipeline.joined.len())?);
        } else if remove_stale(&path)? {
            removed.push(path);
        }
    }

    let path = output_dir.join(FINAL_FILE_NAME);
    if pipeline.has_final_table() {
        write_final_csv(&path, &pipeline.records).context("write final table")?;
        outputs.push(output_file(FINAL_FILE_NAME, path, pipeline.records.len())?);
    } else if remove_stale(&path)? {
        removed.push(path);
    }

    Ok((outputs, removed))
}

/// Deletes `path` if present; returns whether a file was removed.
fn remove_stale(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            warn!(path = %path.display(), "removed output left by an earlier run");
            Ok(true)
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => {
            Err(error).with_context(|| format!("remove stale output {}", path.display()))
        }
    }
}

fn output_file(name: &'static str, path: PathBuf, rows: usize) -> Result<OutputFile> {
    let sha256 =
        sha256_file(&path).with_context(|| format!("fingerprint {}", path.display()))?;
    Ok(OutputFile {
        name,
        path,
        rows,
        sha256,
    })
}

/// Builds the JSON run report; `codusu` values are redacted unless row-level
/// logging is enabled.
pub fn build_run_report(
    params: &RunParameters,
    pipeline: &PipelineOutput,
    outputs: &[OutputFile],
) -> RunReport {
    let integrity = IntegrityReport {
        leading_zero: pipeline
            .integrity
            .leading_zero
            .iter()
            .map(|finding| LeadingZeroFinding {
                row: finding.row,
                user_code: redact_value(&finding.user_code).to_string(),
            })
            .collect(),
        width_overflows: pipeline.integrity.width_overflows.clone(),
    };
    RunReport {
        parameters: ReportParameters::from(params),
        counts: StageCounts {
            course_rows: pipeline.course_rows,
            short_duration: pipeline.course.short_duration.len(),
            undated: pipeline.course.undated,
            registrations: pipeline.registrations.len(),
            joined: pipeline.joined.len(),
            final_records: pipeline.records.len(),
        },
        messages: pipeline.messages.clone(),
        integrity,
        outputs: outputs.to_vec(),
    }
}
