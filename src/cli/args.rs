// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// validata - Declarative validation engine
///
/// Validates JSON data against group-aware rule templates.
#[derive(Parser, Debug)]
#[command(name = "validata")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Declarative, group-aware data validation", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate a JSON data file against the configured rules
    Check(CheckArgs),

    /// Print the rules of a group after placeholder expansion
    Expand(ExpandArgs),

    /// List the registered rule names
    Rules,

    /// Print version information
    Version,

    /// Initialize validata configuration
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// JSON file with the data to validate (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Validation group (defaults to the configured group)
    #[arg(short, long)]
    pub group: Option<String>,

    /// Strict mode: fail with a single resolved error code
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the expand command.
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// JSON file with the data used for placeholders (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Validation group (defaults to the configured group)
    #[arg(short, long)]
    pub group: Option<String>,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Whether JSON output was requested.
    pub fn is_json(&self) -> bool {
        self.format == Some(OutputFormat::Json)
    }
}
