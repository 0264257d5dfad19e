use std::path::Path;

use anyhow::Context;
use teamfit_config::TeamfitConfig;
use teamfit_core::roster::RosterSnapshot;

/// Load `.env` from the working directory (if present), then layered config.
pub fn load_config() -> anyhow::Result<TeamfitConfig> {
    TeamfitConfig::load_with_dotenv().context("failed to load teamfit configuration")
}

/// Read and validate a JSON roster snapshot.
pub fn load_roster(path: &Path) -> anyhow::Result<RosterSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file {}", path.display()))?;
    let roster: RosterSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse roster file {}", path.display()))?;
    roster
        .validate()
        .with_context(|| format!("roster file {} is inconsistent", path.display()))?;

    tracing::debug!(
        students = roster.students.len(),
        teams = roster.teams.len(),
        projects = roster.projects.len(),
        preferences = roster.preferences.len(),
        "loaded roster"
    );
    Ok(roster)
}

/// Write `roster` back to `path` as pretty JSON.
pub fn save_roster(path: &Path, roster: &RosterSnapshot) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(roster)?;
    std::fs::write(path, json).with_context(|| format!("failed to write roster file {}", path.display()))
}
