//! PDCM submission validator CLI.

use clap::{ColorChoice, Parser};
use pdcm_cli::logging::{LogConfig, LogFormat, init_logging};
use pdcm_model::ServiceError;
use pdcm_report::report_to_json;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ReportFormatArg};
use crate::commands::{run_schemas, run_validate};
use crate::summary::print_summary;

/// Exit code for rejected submissions (bad upload, unknown sheet).
const EXIT_BAD_REQUEST: i32 = 2;
/// Exit code when the submission was processed but has invalid sheets.
const EXIT_INVALID: i32 = 3;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Validate(args) => match run_validate(&args) {
            Ok(report) => {
                match args.format {
                    ReportFormatArg::Table => print_summary(&report),
                    ReportFormatArg::Json => match report_to_json(&report) {
                        Ok(json) => println!("{json}"),
                        Err(error) => eprintln!("error: {error:#}"),
                    },
                }
                if report.is_valid() { 0 } else { EXIT_INVALID }
            }
            Err(error) => report_error(&error),
        },
        Command::Schemas(args) => match run_schemas(&args) {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

/// Print the failure and pick the exit code.
///
/// Operational errors are reported as-is. Anything else prints the critical
/// payload, since the service cannot run in that state.
fn report_error(error: &anyhow::Error) -> i32 {
    let Some(service) = error.downcast_ref::<ServiceError>() else {
        eprintln!("error: {error:#}");
        return 1;
    };
    let payload = service.payload();
    match serde_json::to_string_pretty(&payload) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("error: {service}"),
    }
    if service.is_operational() {
        EXIT_BAD_REQUEST
    } else {
        tracing::error!(error = %service, "{}", service.name());
        1
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
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
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
