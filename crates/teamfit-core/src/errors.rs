//! Cross-cutting error types for Teamfit.
//!
//! This module defines errors raised while building or mutating domain values.
//! Engine-level errors (`EngineError`) live in `teamfit-engine`, and the CLI
//! converges everything into `anyhow`.

use thiserror::Error;

use crate::enums::EntityKind;

/// Errors that can be raised by any Teamfit crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {kind} {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Data failed validation (ranges, list sizes, self references).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A member was added to a team that is already at capacity.
    #[error("Team {team_id} is full ({capacity} members)")]
    TeamFull { team_id: u32, capacity: usize },

    /// A member with the same unique code is already on the team.
    #[error("Student {unique_id} is already a member of team {team_id}")]
    DuplicateMember { team_id: u32, unique_id: String },

    /// The referenced student is not on the team.
    #[error("Student {unique_id} is not a member of team {team_id}")]
    NotAMember { team_id: u32, unique_id: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
