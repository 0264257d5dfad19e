//! Hard and advisory constraints on team membership.
//!
//! Three checks:
//! - [`produce_requirements`]: what a group of students demands of anyone
//!   joining it (a leader, and nobody on a refusal list).
//! - [`check_mutual_agreement`]: whether two parties exchanging students
//!   (a team and another team, or a team and the unassigned pool) both accept
//!   the student they receive.
//! - [`check_personality_imbalance`]: whether a candidate would lock a team
//!   into fewer than [`MIN_DISTINCT_PERSONALITIES`] personality categories.

use std::collections::BTreeSet;

use teamfit_core::entities::{Student, TEAM_CAPACITY, Team};
use teamfit_core::enums::Personality;

use crate::error::EngineError;

/// Distinct personality categories a full team should hold.
pub const MIN_DISTINCT_PERSONALITIES: usize = 3;

/// What a group demands of an incoming member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirement {
    /// No member of the group is a leader.
    pub leader_required: bool,
    /// Union of every member's declared conflicters.
    pub refused: BTreeSet<String>,
}

/// Requirements of `current` plus `pending` members, or `None` when there are none.
pub fn produce_requirements<'a>(
    current: impl IntoIterator<Item = &'a Student>,
    pending: impl IntoIterator<Item = &'a Student>,
) -> Option<Requirement> {
    let mut has_leader = false;
    let mut refused = BTreeSet::new();
    for student in current.into_iter().chain(pending) {
        has_leader |= student.is_leader();
        refused.extend(student.conflicts.iter().cloned());
    }

    let requirement = Requirement {
        leader_required: !has_leader,
        refused,
    };
    (requirement.leader_required || !requirement.refused.is_empty()).then_some(requirement)
}

/// One party in a two-way exchange: its current members and the student it
/// gives up, if any.
///
/// The unassigned pool is a party with no members.
#[derive(Debug, Clone, Copy)]
pub struct TeamOffer<'a> {
    pub members: &'a [Student],
    pub offered: Option<&'a Student>,
}

impl<'a> TeamOffer<'a> {
    #[must_use]
    pub const fn new(members: &'a [Student], offered: Option<&'a Student>) -> Self {
        Self { members, offered }
    }

    /// The unassigned pool giving up `student`.
    #[must_use]
    pub const fn pool(student: &'a Student) -> Self {
        Self {
            members: &[],
            offered: Some(student),
        }
    }

    /// Members left once the offered student has gone.
    fn remaining(&self) -> impl Iterator<Item = &'a Student> + '_ {
        let offered = self.offered.map(|s| s.unique_id.as_str());
        self.members
            .iter()
            .filter(move |m| Some(m.unique_id.as_str()) != offered)
    }
}

/// Unmet requirements on either side of an exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disagreement {
    /// Requirement of the first party that its incoming student fails.
    pub first: Option<Requirement>,
    /// Requirement of the second party that its incoming student fails.
    pub second: Option<Requirement>,
}

/// Check both parties accept the student they would receive.
///
/// Each party's membership, minus the student it offers, is checked against
/// the student the other party offers. The leader requirement is only
/// enforced when that membership already has `TEAM_CAPACITY - 1` members,
/// i.e. the incoming student takes the last slot; with more open slots it is
/// waived. A refusal in either direction between the incoming student and a
/// remaining member blocks the exchange.
///
/// Returns `None` when agreement is reached.
#[must_use]
pub fn check_mutual_agreement(first: &TeamOffer<'_>, second: &TeamOffer<'_>) -> Option<Disagreement> {
    let disagreement = Disagreement {
        first: unmet_requirement(first, second.offered),
        second: unmet_requirement(second, first.offered),
    };
    (disagreement.first.is_some() || disagreement.second.is_some()).then_some(disagreement)
}

fn unmet_requirement(receiving: &TeamOffer<'_>, incoming: Option<&Student>) -> Option<Requirement> {
    let incoming = incoming?;
    let remaining: Vec<&Student> = receiving.remaining().collect();
    let requirement = produce_requirements(remaining.iter().copied(), [incoming])?;

    let leader_unmet = requirement.leader_required && remaining.len() + 1 >= TEAM_CAPACITY;
    let refused = remaining
        .iter()
        .any(|m| m.refuses(&incoming.unique_id) || incoming.refuses(&m.unique_id));

    (leader_unmet || refused).then_some(requirement)
}

/// Personality categories a team still lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalityAdvice {
    /// The candidate takes the last slot, so the imbalance would be locked in.
    /// When `false` the advice is informational only.
    pub must_enforce: bool,
    /// Categories absent from the prospective team.
    pub needed: BTreeSet<Personality>,
}

/// Check whether adding `candidate` to `team` leaves it short of
/// [`MIN_DISTINCT_PERSONALITIES`].
///
/// Returns `Ok(None)` for an empty team or a prospective team that is
/// already diverse enough.
///
/// # Errors
///
/// Returns [`EngineError::MissingPersonality`] if the candidate or any
/// member has no personality set.
pub fn check_personality_imbalance(
    team: &Team,
    candidate: &Student,
) -> Result<Option<PersonalityAdvice>, EngineError> {
    let candidate_personality = personality_of(candidate)?;
    if team.is_empty() {
        return Ok(None);
    }

    let mut present = BTreeSet::from([candidate_personality]);
    for member in &team.members {
        present.insert(personality_of(member)?);
    }
    if present.len() >= MIN_DISTINCT_PERSONALITIES {
        return Ok(None);
    }

    let needed = Personality::ALL
        .into_iter()
        .filter(|p| !present.contains(p))
        .collect();
    Ok(Some(PersonalityAdvice {
        must_enforce: team.len() + 1 >= TEAM_CAPACITY,
        needed,
    }))
}

fn personality_of(student: &Student) -> Result<Personality, EngineError> {
    student
        .personality
        .ok_or_else(|| EngineError::MissingPersonality(student.unique_id.clone()))
}
