//! Course-completion ETL CLI.

use std::io::{self, IsTerminal};

use chrono::Local;
use clap::{ColorChoice, Parser};
use cnh_cli::commands::{RunOptions, run_etl};
use cnh_cli::logging::{LogConfig, LogFormat, init_logging};
use cnh_model::RunParameters;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, RunArgs};
use crate::summary::{print_layout, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Run(args) => {
            let (options, params) = run_inputs(args);
            match run_etl(&options, params) {
                Ok(result) => {
                    print_summary(&result, args.preview);
                    if result.is_success() { 0 } else { 1 }
                }
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
        Command::Layout => {
            print_layout();
            0
        }
    };
    std::process::exit(exit_code);
}

fn run_inputs(args: &RunArgs) -> (RunOptions, RunParameters) {
    let run_date = args
        .run_date
        .unwrap_or_else(|| Local::now().date_naive());
    let params = RunParameters::new(run_date)
        .with_starting_sequence(args.start_seq)
        .with_update_type(args.update_type)
        .with_course_hours(args.hours);
    let options = RunOptions {
        course_report: args.course_report.clone(),
        registration_form: args.registration_form.clone(),
        output_dir: args.output_dir.clone(),
        write_joined: args.write_joined,
        dry_run: args.dry_run,
        report_json: args.report_json,
    };
    (options, params)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        log_data: cli.log_data,
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
