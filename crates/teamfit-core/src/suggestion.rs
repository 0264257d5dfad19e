//! Suggestion values returned by the analyzers.
//!
//! A suggestion is a proposed move plus the combined score of the
//! configuration it would produce. The caller decides whether to commit it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Student;
use crate::history::HistoryEntry;

/// Place `student` on `team_id`, displacing `displaced` if present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AssignmentSuggestion {
    pub team_id: u32,
    pub student: Student,
    pub displaced: Option<Student>,
    pub score: f64,
}

/// Exchange `first_student` (on `first_team_id`) with `second_student`
/// (on `second_team_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwapSuggestion {
    pub first_team_id: u32,
    pub first_student: Student,
    pub second_team_id: u32,
    pub second_student: Student,
    /// Mean of the two resulting teams' combined scores.
    pub score: f64,
}

/// Any analyzer result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    Assignment(AssignmentSuggestion),
    Swap(SwapSuggestion),
}

impl Suggestion {
    #[must_use]
    pub const fn score(&self) -> f64 {
        match self {
            Self::Assignment(s) => s.score,
            Self::Swap(s) => s.score,
        }
    }

    /// The history record this suggestion produces once committed.
    #[must_use]
    pub fn to_history_entry(&self) -> HistoryEntry {
        match self {
            Self::Assignment(s) => HistoryEntry::Assignment {
                team_id: s.team_id,
                student: s.student.clone(),
                displaced: s.displaced.clone(),
            },
            Self::Swap(s) => HistoryEntry::Swap {
                first_team_id: s.first_team_id,
                first_student: s.first_student.clone(),
                second_team_id: s.second_team_id,
                second_student: s.second_student.clone(),
            },
        }
    }
}

impl From<AssignmentSuggestion> for Suggestion {
    fn from(value: AssignmentSuggestion) -> Self {
        Self::Assignment(value)
    }
}

impl From<SwapSuggestion> for Suggestion {
    fn from(value: SwapSuggestion) -> Self {
        Self::Swap(value)
    }
}
