//! CLI argument definitions for the annotation import validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "aiv",
    version,
    about = "Annotation import validator - check NDJSON annotation imports before upload",
    long_about = "Validate newline-delimited JSON annotation imports against a project's\n\
                  ontology and data rows.\n\n\
                  Each line is resolved to one annotation type, checked for geometry and\n\
                  answer consistency, and cross-referenced against the ontology."
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

    /// Include record contents in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate an NDJSON annotation import.
    Validate(ValidateArgs),

    /// List supported annotation types and their determinant fields.
    Kinds,

    /// Show the feature schemas indexed from an ontology snapshot.
    Ontology(OntologyArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// NDJSON file with one annotation per line.
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// Ontology snapshot (JSON, bare or wrapped in "normalized").
    #[arg(long = "ontology", value_name = "FILE")]
    pub ontology: PathBuf,

    /// Data-row ids attached to the project (JSON array or one id per line).
    #[arg(long = "data-rows", value_name = "FILE")]
    pub data_rows: PathBuf,

    /// Report every invalid line instead of stopping at the first.
    #[arg(long = "collect-all")]
    pub collect_all: bool,

    /// Validate records on this many worker threads.
    #[arg(long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Require 25-character platform ids and UUID-shaped uuids.
    #[arg(long = "strict-ids")]
    pub strict_ids: bool,

    /// Stop after this many errors (with --collect-all).
    #[arg(
        long = "max-errors",
        value_name = "N",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_errors: Option<usize>,

    /// Write validated records to this NDJSON file when the batch passes.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write validation_report.json into this directory.
    #[arg(long = "report-dir", value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// TOML configuration file with a [validation] table.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct OntologyArgs {
    /// Ontology snapshot (JSON, bare or wrapped in "normalized").
    #[arg(long = "ontology", value_name = "FILE")]
    pub ontology: PathBuf,
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

    const BASE: [&str; 6] = [
        "aiv",
        "validate",
        "--ontology",
        "ontology.json",
        "--data-rows",
        "rows.txt",
    ];

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv = BASE.to_vec();
        argv.extend_from_slice(extra);
        argv.push("batch.ndjson");
        Cli::try_parse_from(argv)
    }

    #[test]
    fn max_errors_must_be_positive() {
        assert!(parse(&["--collect-all", "--max-errors", "0"]).is_err());

        let cli = parse(&["--collect-all", "--max-errors", "3"]).unwrap();
        match cli.command {
            Command::Validate(args) => assert_eq!(args.max_errors, Some(3)),
            _ => panic!("expected validate"),
        }
    }
}
