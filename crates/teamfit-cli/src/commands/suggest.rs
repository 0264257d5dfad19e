use serde::Serialize;
use teamfit_config::{TeamfitConfig, WorkerConfig};
use teamfit_core::roster::RosterSnapshot;
use teamfit_core::suggestion::Suggestion;
use teamfit_engine::moves::commit;
use teamfit_engine::{
    AnalysisWorker, Analyzer, AssignAcrossTeams, AssignToTeam, FitnessCalculator, History, SecondTeamFor,
    SwapAcrossAllPairs, SwapBetweenTeams,
};

use crate::bootstrap::{load_roster, save_roster};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::SuggestCommands;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    analyzer: &'static str,
    suggestion: Option<Suggestion>,
    applied: bool,
}

pub async fn handle(action: &SuggestCommands, config: &TeamfitConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut roster = load_roster(&flags.roster)?;
    let calculator = FitnessCalculator::new(config.fitness);

    let response = run(action, &mut roster, calculator, &config.worker).await?;
    if response.applied {
        save_roster(&flags.roster, &roster)?;
        tracing::info!(roster = %flags.roster.display(), "roster updated");
    }
    output(&response, flags.format)
}

/// Run the analyzer selected by `action` on the worker and, with `--apply`,
/// commit its suggestion to `roster`.
pub async fn run(
    action: &SuggestCommands,
    roster: &mut RosterSnapshot,
    calculator: FitnessCalculator,
    worker_config: &WorkerConfig,
) -> anyhow::Result<SuggestResponse> {
    let worker = AnalysisWorker::spawn(calculator, worker_config);
    let result = match action {
        SuggestCommands::Assign(args) => submit(&worker, AssignToTeam::new(args.team), roster).await,
        SuggestCommands::AssignAll(_) => submit(&worker, AssignAcrossTeams, roster).await,
        SuggestCommands::Swap(args) => {
            submit(&worker, SwapBetweenTeams::new(args.first, args.second), roster).await
        }
        SuggestCommands::SwapAll(_) => submit(&worker, SwapAcrossAllPairs, roster).await,
        SuggestCommands::Partner(args) => submit(&worker, SecondTeamFor::new(args.team), roster).await,
    };
    worker.shutdown().await;
    let (analyzer, suggestion) = result?;

    let applied = match &suggestion {
        Some(s) if wants_apply(action) => {
            commit(roster, s, &mut History::new(), &calculator)?;
            true
        }
        _ => false,
    };

    Ok(SuggestResponse {
        analyzer,
        suggestion,
        applied,
    })
}

async fn submit(
    worker: &AnalysisWorker,
    analyzer: impl Analyzer + 'static,
    roster: &RosterSnapshot,
) -> anyhow::Result<(&'static str, Option<Suggestion>)> {
    let name = analyzer.name();
    let suggestion = worker.submit(analyzer, roster.clone()).await?;
    if suggestion.is_none() {
        tracing::info!(analyzer = name, "no suggestion available");
    }
    Ok((name, suggestion))
}

const fn wants_apply(action: &SuggestCommands) -> bool {
    match action {
        SuggestCommands::Assign(args) | SuggestCommands::Partner(args) => args.apply.apply,
        SuggestCommands::AssignAll(args) | SuggestCommands::SwapAll(args) => args.apply,
        SuggestCommands::Swap(args) => args.apply.apply,
    }
}
