//! CLI command definitions for confstack
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the show subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowFormat {
    /// YAML (default)
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

/// Layered configuration resolver and inspection tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding schema and layer files
    #[arg(short, long, default_value = ".", global = true)]
    pub base_dir: PathBuf,

    /// Prefix selecting environment variable overrides
    #[arg(short, long, default_value = "CONFSTACK_", global = true)]
    pub env_prefix: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve all layers and report where every value came from
    Check(CheckArgs),

    /// Print one resolved value by dotted path
    Get(GetArgs),

    /// Print the full merged configuration tree
    Show(ShowArgs),

    /// Write the merged configuration to a file
    Export(ExportArgs),
}

/// Arguments for the check subcommand
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted path into the merged tree, e.g. logging.level
    pub path: String,

    /// Value to print when the path is absent
    #[arg(short, long)]
    pub default: Option<String>,
}

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<ShowFormat>,
}

/// Arguments for the export subcommand
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path; extension picks the format
    pub output: PathBuf,

    /// Export only the subtree at this dotted path
    #[arg(short, long)]
    pub path: Option<String>,
}
