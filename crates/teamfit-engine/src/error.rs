//! Engine error types for teamfit-engine.

use teamfit_core::errors::CoreError;
use thiserror::Error;

/// Errors from fitness computation, move evaluation, and undo.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A domain value rejected the operation (lookup miss, full team, duplicate).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Fitness was requested for a team that is not at capacity.
    #[error("Team {team_id} has {members} members; fitness requires exactly {capacity}")]
    TeamNotFull {
        team_id: u32,
        members: usize,
        capacity: usize,
    },

    /// A team with no members cannot be measured.
    #[error("Team {team_id} has no members")]
    EmptyTeam { team_id: u32 },

    /// The team's project is not in the catalog.
    #[error("Project not found in catalog: {0}")]
    ProjectNotFound(String),

    /// A personality-dependent check ran on a student without one.
    #[error("Student {0} has no personality set")]
    MissingPersonality(String),

    /// Undo was requested with nothing recorded.
    #[error("History is empty; nothing to undo")]
    EmptyHistory,

    /// The request itself is malformed (e.g. swapping a team with itself).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors surfaced by [`crate::worker::AnalysisWorker`].
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker has shut down and no longer accepts jobs.
    #[error("Analysis worker is closed")]
    Closed,

    /// The analyzer rejected the request.
    #[error(transparent)]
    Analysis(#[from] EngineError),
}

/// Errors from a [`crate::maintenance::FitnessStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The roster could not be read.
    #[error("Failed to load roster: {0}")]
    Load(String),

    /// Fitness for a team could not be written back.
    #[error("Failed to save fitness for team {team_id}: {reason}")]
    Save { team_id: u32, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
