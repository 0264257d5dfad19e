use teamfit_config::TeamfitConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

pub fn handle(config: &TeamfitConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(config, flags.format)
}
