use clap::{Args, Subcommand};

/// Suggestion commands, one per analyzer.
#[derive(Clone, Debug, Subcommand)]
pub enum SuggestCommands {
    /// Best unassigned student for one team.
    Assign(SuggestTeamArgs),
    /// Best unassigned student for any team.
    AssignAll(ApplyArgs),
    /// Best swap between two teams.
    Swap(SuggestSwapArgs),
    /// Best swap between any two teams.
    SwapAll(ApplyArgs),
    /// Best swap partner team for one team.
    Partner(SuggestTeamArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ApplyArgs {
    /// Commit the suggestion and write the updated roster back.
    #[arg(long)]
    pub apply: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SuggestTeamArgs {
    /// Team id.
    #[arg(long)]
    pub team: u32,
    #[command(flatten)]
    pub apply: ApplyArgs,
}

#[derive(Clone, Debug, Args)]
pub struct SuggestSwapArgs {
    /// First team id.
    #[arg(long)]
    pub first: u32,
    /// Second team id.
    #[arg(long)]
    pub second: u32,
    #[command(flatten)]
    pub apply: ApplyArgs,
}
