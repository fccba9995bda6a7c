//! CLI argument definitions for the PDCM validator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pdcm-validator",
    version,
    about = "Validate PDCM Excel submissions against a data dictionary",
    long_about = "Validate PDCM Excel submissions against a data dictionary.\n\n\
                  Each sheet is checked against the schema of the same name; error\n\
                  rows refer to lines of the original spreadsheet. Valid submissions\n\
                  also receive a completeness score per model."
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

    /// Allow cell values in trace logs. Submissions may contain patient data.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate an Excel submission and report errors per sheet.
    Validate(ValidateArgs),

    /// List the schemas of a dictionary.
    Schemas(DictionaryArgs),
}

/// Which dictionary to validate against.
#[derive(Args)]
pub struct DictionaryArgs {
    /// Directory holding exported dictionary JSON files.
    #[arg(
        long = "dictionary-dir",
        env = "PDCM_DICTIONARY_DIR",
        value_name = "DIR",
        default_value = "dictionaries"
    )]
    pub dictionary_dir: PathBuf,

    /// Dictionary name.
    #[arg(long = "dictionary-name", env = "PDCM_DICTIONARY_NAME", value_name = "NAME")]
    pub dictionary_name: String,

    /// Dictionary version.
    #[arg(
        long = "dictionary-version",
        env = "PDCM_DICTIONARY_VERSION",
        value_name = "VERSION"
    )]
    pub dictionary_version: String,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Excel workbook to validate (.xlsx or .xls).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Skip model completeness scoring.
    #[arg(long = "no-score")]
    pub no_score: bool,

    /// Also write the JSON report to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// How to print the report.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
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
