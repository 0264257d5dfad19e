use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Student, TeamFitness};
use crate::enums::Personality;
use crate::errors::CoreError;

/// Fixed group size at which team fitness becomes defined.
pub const TEAM_CAPACITY: usize = 4;

/// A working group assigned to one project.
///
/// Mutating methods (`add_member`, `remove_member`, `replace_member`) are used
/// when a move is committed. The `with_*` methods return a new snapshot and
/// leave `self` untouched; the search only ever uses those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Team {
    pub id: u32,
    /// Unique code of the assigned project.
    pub project_id: String,
    #[serde(default)]
    pub members: Vec<Student>,
    pub fitness: Option<TeamFitness>,
    /// Set while the team only exists because of a pending move.
    #[serde(skip)]
    pub newly_created: bool,
}

impl Team {
    #[must_use]
    pub fn new(id: u32, project_id: impl Into<String>) -> Self {
        Self {
            id,
            project_id: project_id.into(),
            members: Vec::new(),
            fitness: None,
            newly_created: false,
        }
    }

    /// A team created to receive a pending assignment.
    #[must_use]
    pub fn pending(id: u32, project_id: impl Into<String>) -> Self {
        Self {
            newly_created: true,
            ..Self::new(id, project_id)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.members.len() >= TEAM_CAPACITY
    }

    #[must_use]
    pub fn open_slots(&self) -> usize {
        TEAM_CAPACITY.saturating_sub(self.members.len())
    }

    #[must_use]
    pub fn contains(&self, unique_id: &str) -> bool {
        self.members.iter().any(|m| m.unique_id == unique_id)
    }

    #[must_use]
    pub fn member(&self, unique_id: &str) -> Option<&Student> {
        self.members.iter().find(|m| m.unique_id == unique_id)
    }

    #[must_use]
    pub fn has_leader(&self) -> bool {
        self.members.iter().any(Student::is_leader)
    }

    /// Distinct personality categories present (members without one are ignored).
    #[must_use]
    pub fn personalities(&self) -> BTreeSet<Personality> {
        self.members.iter().filter_map(|m| m.personality).collect()
    }

    /// Append a member.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TeamFull`] at capacity, or
    /// [`CoreError::DuplicateMember`] if the unique code is already present.
    pub fn add_member(&mut self, student: Student) -> Result<(), CoreError> {
        if self.contains(&student.unique_id) {
            return Err(CoreError::DuplicateMember {
                team_id: self.id,
                unique_id: student.unique_id,
            });
        }
        if self.is_full() {
            return Err(CoreError::TeamFull {
                team_id: self.id,
                capacity: TEAM_CAPACITY,
            });
        }
        self.members.push(student);
        Ok(())
    }

    /// Remove and return a member.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotAMember`] if the student is not on the team.
    pub fn remove_member(&mut self, unique_id: &str) -> Result<Student, CoreError> {
        let index = self.position(unique_id)?;
        Ok(self.members.remove(index))
    }

    /// Put `incoming` in the slot held by `outgoing`, returning `outgoing`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotAMember`] if `outgoing` is not on the team, or
    /// [`CoreError::DuplicateMember`] if `incoming` already is.
    pub fn replace_member(&mut self, outgoing: &str, incoming: Student) -> Result<Student, CoreError> {
        let index = self.position(outgoing)?;
        if incoming.unique_id != outgoing && self.contains(&incoming.unique_id) {
            return Err(CoreError::DuplicateMember {
                team_id: self.id,
                unique_id: incoming.unique_id,
            });
        }
        Ok(std::mem::replace(&mut self.members[index], incoming))
    }

    /// Snapshot with `student` appended.
    ///
    /// # Errors
    ///
    /// Same as [`Team::add_member`].
    pub fn with_member(&self, student: Student) -> Result<Self, CoreError> {
        let mut next = self.snapshot();
        next.add_member(student)?;
        Ok(next)
    }

    /// Snapshot with `unique_id` removed.
    ///
    /// # Errors
    ///
    /// Same as [`Team::remove_member`].
    pub fn without_member(&self, unique_id: &str) -> Result<Self, CoreError> {
        let mut next = self.snapshot();
        next.remove_member(unique_id)?;
        Ok(next)
    }

    /// Snapshot with `outgoing` replaced by `incoming`.
    ///
    /// # Errors
    ///
    /// Same as [`Team::replace_member`].
    pub fn with_replacement(&self, outgoing: &str, incoming: Student) -> Result<Self, CoreError> {
        let mut next = self.snapshot();
        next.replace_member(outgoing, incoming)?;
        Ok(next)
    }

    /// Deep copy without fitness, which no longer describes the new membership.
    fn snapshot(&self) -> Self {
        Self {
            fitness: None,
            ..self.clone()
        }
    }

    fn position(&self, unique_id: &str) -> Result<usize, CoreError> {
        self.members
            .iter()
            .position(|m| m.unique_id == unique_id)
            .ok_or_else(|| CoreError::NotAMember {
                team_id: self.id,
                unique_id: unique_id.to_string(),
            })
    }
}
