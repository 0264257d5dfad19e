//! Assignment analyzers: place an unassigned student on a team.
//!
//! A team with open slots takes the student as an extra member. A full team
//! can only take the student by displacing one of its members, so each member
//! is tried as the displaced one.

use teamfit_core::roster::RosterSnapshot;
use teamfit_core::suggestion::Suggestion;
use tracing::debug;

use super::{Analyzer, Best, Evaluator};
use crate::error::EngineError;
use crate::fitness::FitnessCalculator;

/// Best placement of any unassigned student on one chosen team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignToTeam {
    pub team_id: u32,
}

impl AssignToTeam {
    #[must_use]
    pub const fn new(team_id: u32) -> Self {
        Self { team_id }
    }
}

impl Analyzer for AssignToTeam {
    fn name(&self) -> &'static str {
        "assign_to_team"
    }

    #[tracing::instrument(skip_all, fields(team_id = self.team_id))]
    fn analyze(
        &self,
        roster: &RosterSnapshot,
        calculator: &FitnessCalculator,
    ) -> Result<Option<Suggestion>, EngineError> {
        let team = roster.team(self.team_id)?;
        let evaluator = Evaluator::new(roster, calculator);

        let mut best = Best::new();
        evaluator.assignments_into(team, &mut best);

        debug!(considered = best.considered(), "assignment search finished");
        Ok(best.into_inner().map(Suggestion::from))
    }
}

/// Best placement of any unassigned student on any team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignAcrossTeams;

impl Analyzer for AssignAcrossTeams {
    fn name(&self) -> &'static str {
        "assign_across_teams"
    }

    #[tracing::instrument(skip_all)]
    fn analyze(
        &self,
        roster: &RosterSnapshot,
        calculator: &FitnessCalculator,
    ) -> Result<Option<Suggestion>, EngineError> {
        let evaluator = Evaluator::new(roster, calculator);

        let mut best = Best::new();
        for team in &roster.teams {
            evaluator.assignments_into(team, &mut best);
        }

        debug!(
            teams = roster.teams.len(),
            considered = best.considered(),
            "assignment search finished"
        );
        Ok(best.into_inner().map(Suggestion::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::{preference, project, student, team, with_preferences};
    use pretty_assertions::assert_eq;
    use teamfit_core::enums::{Personality, Ranking};
    use teamfit_core::errors::CoreError;

    fn calculator() -> FitnessCalculator {
        FitnessCalculator::default()
    }

    fn unwrap_assignment(suggestion: Option<Suggestion>) -> teamfit_core::suggestion::AssignmentSuggestion {
        match suggestion {
            Some(Suggestion::Assignment(a)) => a,
            other => panic!("expected an assignment, got {other:?}"),
        }
    }

    #[test]
    fn unknown_team_is_an_error() {
        let roster = RosterSnapshot::default();
        let result = AssignToTeam::new(9).analyze(&roster, &calculator());
        assert!(matches!(result, Err(EngineError::Core(CoreError::NotFound { .. }))));
    }

    #[test]
    fn picks_lowest_scoring_candidate() {
        let leader = student("S1", Ranking::Intermediate, Personality::Leader);
        let strong = student("S2", Ranking::Expert, Personality::Outgoing);
        let weak = student("S3", Ranking::Beginner, Personality::Reserved);
        let roster = with_preferences(RosterSnapshot {
            students: vec![leader.clone(), strong, weak],
            teams: vec![team(1, "Pr1", &[&leader])],
            projects: vec![project("Pr1", Ranking::Intermediate)],
            preferences: vec![],
        });

        let suggestion = unwrap_assignment(AssignToTeam::new(1).analyze(&roster, &calculator()).unwrap());
        assert_eq!(suggestion.team_id, 1);
        assert_eq!(suggestion.student.unique_id, "S3");
        assert_eq!(suggestion.displaced, None);
    }

    #[test]
    fn ties_go_to_first_in_collection_order() {
        let leader = student("S1", Ranking::Intermediate, Personality::Leader);
        let a = student("S2", Ranking::Intermediate, Personality::Outgoing);
        let b = student("S3", Ranking::Intermediate, Personality::Outgoing);
        let roster = with_preferences(RosterSnapshot {
            students: vec![leader.clone(), a, b],
            teams: vec![team(1, "Pr1", &[&leader])],
            projects: vec![project("Pr1", Ranking::Intermediate)],
            preferences: vec![],
        });

        let suggestion = unwrap_assignment(AssignToTeam::new(1).analyze(&roster, &calculator()).unwrap());
        assert_eq!(suggestion.student.unique_id, "S2");
    }

    #[test]
    fn students_without_preferences_are_not_candidates() {
        let leader = student("S1", Ranking::Intermediate, Personality::Leader);
        let loner = student("S2", Ranking::Intermediate, Personality::Outgoing);
        let roster = RosterSnapshot {
            students: vec![leader.clone(), loner],
            teams: vec![team(1, "Pr1", &[&leader])],
            projects: vec![project("Pr1", Ranking::Intermediate)],
            preferences: vec![preference("S1", &[("Pr1", 4)])],
        };

        assert_eq!(AssignToTeam::new(1).analyze(&roster, &calculator()).unwrap(), None);
    }

    #[test]
    fn last_slot_requires_a_leader() {
        let members = [
            student("S1", Ranking::Expert, Personality::Outgoing),
            student("S2", Ranking::Expert, Personality::Reserved),
            student("S3", Ranking::Intermediate, Personality::DetailOriented),
        ];
        let follower = student("S4", Ranking::Intermediate, Personality::Reserved);
        let roster = with_preferences(RosterSnapshot {
            students: vec![members[0].clone(), members[1].clone(), members[2].clone(), follower],
            teams: vec![team(1, "Pr1", &[&members[0], &members[1], &members[2]])],
            projects: vec![project("Pr1", Ranking::Intermediate)],
            preferences: vec![],
        });

        assert_eq!(AssignToTeam::new(1).analyze(&roster, &calculator()).unwrap(), None);
    }

    #[test]
    fn refused_students_are_skipped() {
        let leader = student("S1", Ranking::Intermediate, Personality::Leader)
            .with_conflict("S2")
            .unwrap();
        let refused = student("S2", Ranking::Beginner, Personality::Outgoing);
        let other = student("S3", Ranking::Expert, Personality::Reserved);
        let roster = with_preferences(RosterSnapshot {
            students: vec![leader.clone(), refused, other],
            teams: vec![team(1, "Pr1", &[&leader])],
            projects: vec![project("Pr1", Ranking::Intermediate)],
            preferences: vec![],
        });

        let suggestion = unwrap_assignment(AssignToTeam::new(1).analyze(&roster, &calculator()).unwrap());
        assert_eq!(suggestion.student.unique_id, "S3");
    }

    #[test]
    fn full_team_considers_displacement() {
        let members = [
            student("S1", Ranking::Intermediate, Personality::Leader),
            student("S2", Ranking::Expert, Personality::Outgoing),
            student("S3", Ranking::Intermediate, Personality::Reserved),
            student("S4", Ranking::Intermediate, Personality::DetailOriented),
        ];
        let newcomer = student("S5", Ranking::Beginner, Personality::Outgoing);
        let roster = with_preferences(RosterSnapshot {
            students: members.iter().cloned().chain([newcomer]).collect(),
            teams: vec![team(1, "Pr1", &members.iter().collect::<Vec<_>>())],
            projects: vec![project("Pr1", Ranking::Intermediate)],
            preferences: vec![],
        });

        let suggestion = unwrap_assignment(AssignToTeam::new(1).analyze(&roster, &calculator()).unwrap());
        assert_eq!(suggestion.student.unique_id, "S5");
        // Displacing S1 would leave no leader; of the rest, losing the Expert
        // gives the lowest competency.
        assert_eq!(suggestion.displaced.map(|s| s.unique_id), Some("S2".to_string()));
    }

    #[test]
    fn across_teams_searches_every_team() {
        let l1 = student("S1", Ranking::Expert, Personality::Leader);
        let l2 = student("S2", Ranking::Beginner, Personality::Leader);
        let newcomer = student("S3", Ranking::Beginner, Personality::Outgoing);
        let roster = with_preferences(RosterSnapshot {
            students: vec![l1.clone(), l2.clone(), newcomer],
            teams: vec![team(1, "Pr1", &[&l1]), team(2, "Pr1", &[&l2])],
            projects: vec![project("Pr1", Ranking::Intermediate)],
            preferences: vec![],
        });

        let suggestion = unwrap_assignment(AssignAcrossTeams.analyze(&roster, &calculator()).unwrap());
        assert_eq!(suggestion.team_id, 2);
        assert_eq!(suggestion.student.unique_id, "S3");
    }

    #[test]
    fn does_not_mutate_roster() {
        let leader = student("S1", Ranking::Intermediate, Personality::Leader);
        let other = student("S2", Ranking::Beginner, Personality::Outgoing);
        let roster = with_preferences(RosterSnapshot {
            students: vec![leader.clone(), other],
            teams: vec![team(1, "Pr1", &[&leader])],
            projects: vec![project("Pr1", Ranking::Intermediate)],
            preferences: vec![],
        });
        let before = roster.clone();

        AssignAcrossTeams.analyze(&roster, &calculator()).unwrap();
        assert_eq!(roster, before);
    }
}
