use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tfit` binary.
#[derive(Debug, Parser)]
#[command(name = "tfit", version, about = "Teamfit - team fitness scoring and move suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Roster snapshot (JSON) to read, and to update with --apply
    #[arg(short, long, global = true, default_value = "roster.json")]
    pub roster: PathBuf,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            roster: self.roster.clone(),
        }
    }
}
