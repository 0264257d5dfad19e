//! Suggestion analyzers.
//!
//! Every analyzer enumerates its own candidate space in collection order,
//! discards candidates that fail the constraint checks, scores the rest on the
//! prospective team(s) they would produce, and keeps the candidate with the
//! lowest combined score. The first candidate reaching the minimum wins ties.
//!
//! Analyzers never mutate the roster they are given; prospective teams are
//! built with the [`Team`] snapshot constructors.

mod assign;
mod swap;

pub use assign::{AssignAcrossTeams, AssignToTeam};
pub use swap::{SecondTeamFor, SwapAcrossAllPairs, SwapBetweenTeams};

use teamfit_core::entities::{Student, Team};
use teamfit_core::roster::RosterSnapshot;
use teamfit_core::suggestion::{AssignmentSuggestion, Suggestion, SwapSuggestion};
use tracing::debug;

use crate::constraints::{TeamOffer, check_mutual_agreement, check_personality_imbalance};
use crate::error::EngineError;
use crate::fitness::FitnessCalculator;

/// A search strategy that proposes at most one move.
pub trait Analyzer: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Search `roster` and return the best legal move, or `None` when no
    /// candidate survives the constraint checks.
    ///
    /// # Errors
    ///
    /// Returns an error when the request itself cannot be served, e.g. a team
    /// id that is not in the roster.
    fn analyze(
        &self,
        roster: &RosterSnapshot,
        calculator: &FitnessCalculator,
    ) -> Result<Option<Suggestion>, EngineError>;
}

impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn analyze(
        &self,
        roster: &RosterSnapshot,
        calculator: &FitnessCalculator,
    ) -> Result<Option<Suggestion>, EngineError> {
        (**self).analyze(roster, calculator)
    }
}

// ---------------------------------------------------------------------------
// Candidate evaluation
// ---------------------------------------------------------------------------

/// Checks and scores individual candidates against one roster.
pub(crate) struct Evaluator<'a> {
    roster: &'a RosterSnapshot,
    calculator: &'a FitnessCalculator,
}

impl<'a> Evaluator<'a> {
    pub(crate) const fn new(roster: &'a RosterSnapshot, calculator: &'a FitnessCalculator) -> Self {
        Self { roster, calculator }
    }

    pub(crate) fn has_preference(&self, student: &Student) -> bool {
        self.roster.preference_for(&student.unique_id).is_some()
    }

    /// Combined score of a prospective team, or `None` if it cannot be measured.
    fn score_team(&self, team: &Team) -> Option<f64> {
        match self
            .calculator
            .measure(team, &self.roster.projects, &self.roster.preferences)
        {
            Ok(fitness) => Some(fitness.combined_score()),
            Err(e) => {
                debug!(team_id = team.id, error = %e, "skipping candidate: team cannot be scored");
                None
            }
        }
    }

    /// `false` when `candidate` would lock `base` into too few personalities,
    /// or when personality data is missing.
    fn personality_ok(base: &Team, candidate: &Student) -> bool {
        match check_personality_imbalance(base, candidate) {
            Ok(Some(advice)) if advice.must_enforce => {
                debug!(
                    team_id = base.id,
                    student = %candidate.unique_id,
                    needed = ?advice.needed,
                    "skipping candidate: personality imbalance"
                );
                false
            }
            Ok(_) => true,
            Err(e) => {
                debug!(team_id = base.id, error = %e, "skipping candidate");
                false
            }
        }
    }

    /// Evaluate placing `student` on `team`, replacing `displaced` if given.
    pub(crate) fn assignment(
        &self,
        team: &Team,
        student: &Student,
        displaced: Option<&Student>,
    ) -> Option<AssignmentSuggestion> {
        let receiving = TeamOffer::new(&team.members, displaced);
        if let Some(disagreement) = check_mutual_agreement(&receiving, &TeamOffer::pool(student)) {
            debug!(
                team_id = team.id,
                student = %student.unique_id,
                ?disagreement,
                "skipping candidate: constraints not met"
            );
            return None;
        }

        let prospective = match displaced {
            Some(out) => {
                let base = team.without_member(&out.unique_id).ok()?;
                if !Self::personality_ok(&base, student) {
                    return None;
                }
                team.with_replacement(&out.unique_id, student.clone()).ok()?
            }
            None => {
                if !Self::personality_ok(team, student) {
                    return None;
                }
                team.with_member(student.clone()).ok()?
            }
        };

        let score = self.score_team(&prospective)?;
        Some(AssignmentSuggestion {
            team_id: team.id,
            student: student.clone(),
            displaced: displaced.cloned(),
            score,
        })
    }

    /// Evaluate exchanging `a` (on `first`) with `b` (on `second`).
    pub(crate) fn swap(
        &self,
        first: &Team,
        a: &Student,
        second: &Team,
        b: &Student,
    ) -> Option<SwapSuggestion> {
        let first_offer = TeamOffer::new(&first.members, Some(a));
        let second_offer = TeamOffer::new(&second.members, Some(b));
        if let Some(disagreement) = check_mutual_agreement(&first_offer, &second_offer) {
            debug!(
                first_team_id = first.id,
                second_team_id = second.id,
                first_student = %a.unique_id,
                second_student = %b.unique_id,
                ?disagreement,
                "skipping swap: constraints not met"
            );
            return None;
        }

        let first_base = first.without_member(&a.unique_id).ok()?;
        let second_base = second.without_member(&b.unique_id).ok()?;
        if !Self::personality_ok(&first_base, b) || !Self::personality_ok(&second_base, a) {
            return None;
        }

        let first_next = first.with_replacement(&a.unique_id, b.clone()).ok()?;
        let second_next = second.with_replacement(&b.unique_id, a.clone()).ok()?;
        let score = f64::midpoint(self.score_team(&first_next)?, self.score_team(&second_next)?);

        Some(SwapSuggestion {
            first_team_id: first.id,
            first_student: a.clone(),
            second_team_id: second.id,
            second_student: b.clone(),
            score,
        })
    }

    /// Feed every legal placement of an unassigned, preference-bearing
    /// student on `team` into `best`.
    pub(crate) fn assignments_into(&self, team: &Team, best: &mut Best<AssignmentSuggestion>) {
        for student in self.roster.unassigned_students().filter(|s| self.has_preference(s)) {
            if team.is_full() {
                for displaced in &team.members {
                    best.offer(self.assignment(team, student, Some(displaced)));
                }
            } else {
                best.offer(self.assignment(team, student, None));
            }
        }
    }

    /// Feed every legal swap between preference-bearing members of `first`
    /// and `second` into `best`.
    pub(crate) fn swaps_between(&self, first: &Team, second: &Team, best: &mut Best<SwapSuggestion>) {
        for a in first.members.iter().filter(|s| self.has_preference(s)) {
            for b in second.members.iter().filter(|s| self.has_preference(s)) {
                best.offer(self.swap(first, a, second, b));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Anything carrying a combined score.
pub(crate) trait Scored {
    fn score(&self) -> f64;
}

impl Scored for AssignmentSuggestion {
    fn score(&self) -> f64 {
        self.score
    }
}

impl Scored for SwapSuggestion {
    fn score(&self) -> f64 {
        self.score
    }
}

/// Running minimum. Later candidates only replace the current one when
/// strictly lower, so the first candidate at the minimum is kept.
pub(crate) struct Best<T> {
    current: Option<T>,
    considered: usize,
}

impl<T: Scored> Best<T> {
    pub(crate) const fn new() -> Self {
        Self {
            current: None,
            considered: 0,
        }
    }

    pub(crate) fn offer(&mut self, candidate: Option<T>) {
        let Some(candidate) = candidate else {
            return;
        };
        self.considered += 1;
        if self
            .current
            .as_ref()
            .is_none_or(|current| candidate.score() < current.score())
        {
            self.current = Some(candidate);
        }
    }

    pub(crate) const fn considered(&self) -> usize {
        self.considered
    }

    pub(crate) fn into_inner(self) -> Option<T> {
        self.current
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Plain(f64);

    impl Scored for Plain {
        fn score(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn best_keeps_minimum() {
        let mut best = Best::new();
        for score in [3.0, 1.5, 2.0] {
            best.offer(Some(Plain(score)));
        }
        assert_eq!(best.considered(), 3);
        assert_eq!(best.into_inner().map(|p| p.0), Some(1.5));
    }

    #[test]
    fn best_keeps_first_of_equal_scores() {
        let mut best = Best::new();
        best.offer(Some((1.0, "first")));
        best.offer(Some((1.0, "second")));
        assert_eq!(best.into_inner().map(|p| p.1), Some("first"));
    }

    #[test]
    fn best_ignores_rejected_candidates() {
        let mut best: Best<Plain> = Best::new();
        best.offer(None);
        assert_eq!(best.considered(), 0);
        assert!(best.into_inner().is_none());
    }

    impl Scored for (f64, &str) {
        fn score(&self) -> f64 {
            self.0
        }
    }
}
