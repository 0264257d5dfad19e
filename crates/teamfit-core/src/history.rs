//! Committed-move records.
//!
//! Every committed move is recorded as a `HistoryEntry` so it can be reversed
//! exactly. Entries carry full student values (not just unique codes) because
//! undo has to put a displaced student back on a team.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Student;

/// A single committed move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntry {
    /// `student` joined `team_id`, optionally displacing a member.
    Assignment {
        team_id: u32,
        student: Student,
        displaced: Option<Student>,
    },

    /// `first_student` left `first_team_id` for `second_team_id`, and
    /// `second_student` went the other way.
    Swap {
        first_team_id: u32,
        first_student: Student,
        second_team_id: u32,
        second_student: Student,
    },
}

impl HistoryEntry {
    /// Teams whose membership this entry changed.
    #[must_use]
    pub fn team_ids(&self) -> Vec<u32> {
        match self {
            Self::Assignment { team_id, .. } => vec![*team_id],
            Self::Swap {
                first_team_id,
                second_team_id,
                ..
            } => vec![*first_team_id, *second_team_id],
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Assignment { .. } => "assignment",
            Self::Swap { .. } => "swap",
        }
    }
}
