use clap::{Args, Subcommand};

use crate::cli::subcommands::SuggestCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Compute fitness for full teams.
    Fitness(FitnessArgs),
    /// Ask an analyzer for the next move.
    Suggest {
        #[command(subcommand)]
        action: SuggestCommands,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct FitnessArgs {
    /// Team id. Without it, every full team is reported.
    #[arg(long)]
    pub team: Option<u32>,
}
