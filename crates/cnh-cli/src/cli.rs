//! CLI argument definitions for the course-completion ETL.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use cnh_model::{CourseHours, DEFAULT_START_SEQUENCE, UpdateType};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cnh-etl",
    version,
    about = "Build transaction-181 records from a course report and a registration form",
    long_about = "Cross-reference a course-completion report with a registration form \
                  export by CPF and write the fixed-width transaction-181 CSV.\n\n\
                  Also exports the rows completed in under five days for review."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow CPF and license values in logs and in the run report.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process both input files and write the outputs.
    Run(RunArgs),

    /// Print the transaction-181 field layout.
    Layout,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Course-completion report (`;`-delimited).
    #[arg(value_name = "COURSE_CSV")]
    pub course_report: PathBuf,

    /// Registration form export (`,`-delimited).
    #[arg(value_name = "REGISTRATION_CSV")]
    pub registration_form: PathBuf,

    /// Output directory for generated files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// First value of nu-seq-trans.
    #[arg(long = "start-seq", value_name = "N", default_value_t = DEFAULT_START_SEQUENCE)]
    pub start_seq: u64,

    /// tipo-atualizacao: I (insert) or S (substitute).
    #[arg(long = "update-type", value_name = "I|S", default_value = "I")]
    pub update_type: UpdateType,

    /// carga-horaria code.
    #[arg(long = "hours", value_name = "060|018|040", default_value = "060")]
    pub hours: CourseHours,

    /// Date the run is attributed to (default: today).
    ///
    /// Drives dia-juliano; fix it to reproduce an earlier output byte for byte.
    #[arg(long = "run-date", value_name = "YYYY-MM-DD")]
    pub run_date: Option<NaiveDate>,

    /// Also write the joined table (PREPARO_ETL.csv).
    #[arg(long = "write-joined")]
    pub write_joined: bool,

    /// Run every stage and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the first N rows of the joined and final tables.
    #[arg(long = "preview", value_name = "N", default_value_t = 0)]
    pub preview: usize,

    /// Write run_report.json next to the outputs.
    #[arg(long = "report-json")]
    pub report_json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["cnh-etl", "run", "curso.csv", "cadastro.csv"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.start_seq, DEFAULT_START_SEQUENCE);
        assert_eq!(args.update_type, UpdateType::Insert);
        assert_eq!(args.hours, CourseHours::Hours60);
        assert!(args.run_date.is_none());
    }

    #[test]
    fn parameters_parse_from_wire_codes() {
        let cli = Cli::try_parse_from([
            "cnh-etl",
            "run",
            "curso.csv",
            "cadastro.csv",
            "--update-type",
            "S",
            "--hours",
            "040",
            "--run-date",
            "2024-03-01",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.update_type, UpdateType::Substitute);
        assert_eq!(args.hours, CourseHours::Hours40);
        assert_eq!(args.run_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn invalid_hours_rejected_before_processing() {
        assert!(
            Cli::try_parse_from(["cnh-etl", "run", "a.csv", "b.csv", "--hours", "050"]).is_err()
        );
    }
}
