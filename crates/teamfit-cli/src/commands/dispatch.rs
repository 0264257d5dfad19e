use teamfit_config::TeamfitConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, config: &TeamfitConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Fitness(args) => commands::fitness::handle(&args, config, flags),
        Commands::Suggest { action } => commands::suggest::handle(&action, config, flags).await,
        Commands::Config => commands::config::handle(config, flags),
    }
}
