use serde::Serialize;
use teamfit_config::TeamfitConfig;
use teamfit_core::entities::{Team, TeamFitness};
use teamfit_core::roster::RosterSnapshot;
use teamfit_engine::FitnessCalculator;

use crate::bootstrap::load_roster;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::FitnessArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct FitnessResponse {
    team_id: u32,
    project_id: String,
    combined_score: f64,
    fitness: TeamFitness,
}

pub fn handle(args: &FitnessArgs, config: &TeamfitConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let roster = load_roster(&flags.roster)?;
    let calculator = FitnessCalculator::new(config.fitness);
    output(&report(&roster, &calculator, args.team)?, flags.format)
}

/// Fitness for one team, or for every full team when `team` is `None`.
pub fn report(
    roster: &RosterSnapshot,
    calculator: &FitnessCalculator,
    team: Option<u32>,
) -> anyhow::Result<Vec<FitnessResponse>> {
    match team {
        Some(id) => Ok(vec![measure(roster, calculator, roster.team(id)?)?]),
        None => roster
            .teams
            .iter()
            .filter(|t| t.is_full())
            .map(|t| measure(roster, calculator, t))
            .collect(),
    }
}

fn measure(roster: &RosterSnapshot, calculator: &FitnessCalculator, team: &Team) -> anyhow::Result<FitnessResponse> {
    let fitness = calculator.compute(team, &roster.projects, &roster.preferences)?;
    Ok(FitnessResponse {
        team_id: team.id,
        project_id: team.project_id.clone(),
        combined_score: fitness.combined_score(),
        fitness,
    })
}
