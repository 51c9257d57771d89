//! CLI argument definitions for the PMU table generator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pmu-tables",
    version,
    about = "Compile PMU event and metric descriptions into macro tables",
    long_about = "Compile CPU PMU descriptions (events, metrics, metric groups) into\n\
                  column-aligned macro tables.\n\n\
                  Metric formulas are compiled from infix to postfix notation."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate telemetry tables for the configured products.
    Telemetry(TelemetryArgs),

    /// List the products in the catalog.
    List(ListArgs),

    /// Generate the architecture events table from one JSON document.
    ArchEvents(ArchEventsArgs),
}

#[derive(Args)]
pub struct TelemetryArgs {
    /// TOML configuration file (source and catalog).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read documents over HTTP (default).
    #[arg(long = "url", conflicts_with = "file")]
    pub url: bool,

    /// Read documents from a local directory.
    #[arg(long = "file")]
    pub file: bool,

    /// Local directory holding `<family>/<document>` files.
    #[arg(long = "source-root", value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Base URL holding `<family>/<document>` files.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Process only this product (e.g. neoverse-n1).
    #[arg(short = 'c', long = "cpu", value_name = "NAME")]
    pub cpu: Option<String>,

    /// Output file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// License file emitted as a comment header.
    #[arg(long = "license", value_name = "PATH")]
    pub license: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    /// TOML configuration file (catalog).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ArchEventsArgs {
    /// Local path or http(s) URL of the architecture events document.
    #[arg(long = "input", value_name = "PATH|URL")]
    pub input: String,

    /// Output file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// License file emitted as a comment header.
    #[arg(long = "license", value_name = "PATH")]
    pub license: Option<PathBuf>,
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
