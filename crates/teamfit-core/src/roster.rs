//! In-memory roster snapshot handed to the engine.
//!
//! The surrounding application hydrates a `RosterSnapshot` from storage
//! (teams with their members already resolved) and passes it by value. All
//! lookups are typed; collection order is preserved and is the enumeration
//! order the analyzers rely on.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Preference, Project, Student, TEAM_CAPACITY, Team};
use crate::enums::EntityKind;
use crate::errors::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RosterSnapshot {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub preferences: Vec<Preference>,
}

impl RosterSnapshot {
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no team has this id.
    pub fn team(&self, team_id: u32) -> Result<&Team, CoreError> {
        self.teams
            .iter()
            .find(|t| t.id == team_id)
            .ok_or_else(|| not_found(EntityKind::Team, team_id))
    }

    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no team has this id.
    pub fn team_mut(&mut self, team_id: u32) -> Result<&mut Team, CoreError> {
        self.teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or_else(|| not_found(EntityKind::Team, team_id))
    }

    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no student has this unique code.
    pub fn student(&self, unique_id: &str) -> Result<&Student, CoreError> {
        self.students
            .iter()
            .find(|s| s.unique_id == unique_id)
            .ok_or_else(|| not_found(EntityKind::Student, unique_id))
    }

    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no project has this unique code.
    pub fn project(&self, unique_id: &str) -> Result<&Project, CoreError> {
        self.projects
            .iter()
            .find(|p| p.unique_id == unique_id)
            .ok_or_else(|| not_found(EntityKind::Project, unique_id))
    }

    #[must_use]
    pub fn preference_for(&self, student_unique_id: &str) -> Option<&Preference> {
        self.preferences
            .iter()
            .find(|p| p.student_unique_id == student_unique_id)
    }

    /// Team currently holding `student_unique_id`.
    #[must_use]
    pub fn team_of(&self, student_unique_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.contains(student_unique_id))
    }

    /// Students on no team, in collection order.
    pub fn unassigned_students(&self) -> impl Iterator<Item = &Student> + '_ {
        let assigned: HashSet<&str> = self
            .teams
            .iter()
            .flat_map(|t| t.members.iter().map(|m| m.unique_id.as_str()))
            .collect();
        self.students
            .iter()
            .filter(move |s| !assigned.contains(s.unique_id.as_str()))
    }

    /// Next free team id.
    #[must_use]
    pub fn next_team_id(&self) -> u32 {
        self.teams.iter().map(|t| t.id).max().map_or(1, |id| id + 1)
    }

    /// Check cross-entity invariants: unique codes and team ids are unique, no
    /// team is over capacity, every student sits on at most one team, and every
    /// record passes its own validation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for student in &self.students {
            student.validate()?;
            if !seen.insert(student.unique_id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate student unique id {}",
                    student.unique_id
                )));
            }
        }

        let mut team_ids = HashSet::new();
        let mut placed = HashSet::new();
        for team in &self.teams {
            if !team_ids.insert(team.id) {
                return Err(CoreError::Validation(format!("duplicate team id {}", team.id)));
            }
            if team.len() > TEAM_CAPACITY {
                return Err(CoreError::Validation(format!(
                    "team {} has {} members, capacity is {TEAM_CAPACITY}",
                    team.id,
                    team.len()
                )));
            }
            for member in &team.members {
                if !placed.insert(member.unique_id.as_str()) {
                    return Err(CoreError::Validation(format!(
                        "student {} appears on more than one team (or twice on team {})",
                        member.unique_id, team.id
                    )));
                }
            }
        }

        let mut rated = HashSet::new();
        for preference in &self.preferences {
            preference.validate()?;
            if !rated.insert(preference.student_unique_id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "student {} has more than one preference record",
                    preference.student_unique_id
                )));
            }
        }
        Ok(())
    }
}

fn not_found(kind: EntityKind, id: impl ToString) -> CoreError {
    CoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}
