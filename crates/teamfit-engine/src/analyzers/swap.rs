//! Swap analyzers: exchange one member of a team with one member of another.
//!
//! A swap is scored as the mean of the two resulting teams' combined scores.
//! Only members with a preference record take part.

use teamfit_core::roster::RosterSnapshot;
use teamfit_core::suggestion::Suggestion;
use tracing::debug;

use super::{Analyzer, Best, Evaluator};
use crate::error::EngineError;
use crate::fitness::FitnessCalculator;

/// Best swap between two chosen teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapBetweenTeams {
    pub first_team_id: u32,
    pub second_team_id: u32,
}

impl SwapBetweenTeams {
    #[must_use]
    pub const fn new(first_team_id: u32, second_team_id: u32) -> Self {
        Self {
            first_team_id,
            second_team_id,
        }
    }
}

impl Analyzer for SwapBetweenTeams {
    fn name(&self) -> &'static str {
        "swap_between_teams"
    }

    #[tracing::instrument(skip_all, fields(first = self.first_team_id, second = self.second_team_id))]
    fn analyze(
        &self,
        roster: &RosterSnapshot,
        calculator: &FitnessCalculator,
    ) -> Result<Option<Suggestion>, EngineError> {
        if self.first_team_id == self.second_team_id {
            return Err(EngineError::InvalidRequest(format!(
                "cannot swap team {} with itself",
                self.first_team_id
            )));
        }
        let first = roster.team(self.first_team_id)?;
        let second = roster.team(self.second_team_id)?;
        let evaluator = Evaluator::new(roster, calculator);

        let mut best = Best::new();
        evaluator.swaps_between(first, second, &mut best);

        debug!(considered = best.considered(), "swap search finished");
        Ok(best.into_inner().map(Suggestion::from))
    }
}

/// Best swap over every unordered pair of teams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapAcrossAllPairs;

impl Analyzer for SwapAcrossAllPairs {
    fn name(&self) -> &'static str {
        "swap_across_all_pairs"
    }

    #[tracing::instrument(skip_all)]
    fn analyze(
        &self,
        roster: &RosterSnapshot,
        calculator: &FitnessCalculator,
    ) -> Result<Option<Suggestion>, EngineError> {
        let evaluator = Evaluator::new(roster, calculator);

        let mut best = Best::new();
        for (i, first) in roster.teams.iter().enumerate() {
            for second in &roster.teams[i + 1..] {
                evaluator.swaps_between(first, second, &mut best);
            }
        }

        debug!(considered = best.considered(), "swap search finished");
        Ok(best.into_inner().map(Suggestion::from))
    }
}

/// Best swap partner for one fixed team, searched across every other team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondTeamFor {
    pub team_id: u32,
}

impl SecondTeamFor {
    #[must_use]
    pub const fn new(team_id: u32) -> Self {
        Self { team_id }
    }
}

impl Analyzer for SecondTeamFor {
    fn name(&self) -> &'static str {
        "second_team_for"
    }

    #[tracing::instrument(skip_all, fields(team_id = self.team_id))]
    fn analyze(
        &self,
        roster: &RosterSnapshot,
        calculator: &FitnessCalculator,
    ) -> Result<Option<Suggestion>, EngineError> {
        let fixed = roster.team(self.team_id)?;
        let evaluator = Evaluator::new(roster, calculator);

        let mut best = Best::new();
        for other in roster.teams.iter().filter(|t| t.id != fixed.id) {
            evaluator.swaps_between(fixed, other, &mut best);
        }

        debug!(considered = best.considered(), "partner search finished");
        Ok(best.into_inner().map(Suggestion::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::{project, student, team, with_preferences};
    use pretty_assertions::assert_eq;
    use teamfit_core::entities::{Student, Team};
    use teamfit_core::enums::{Personality, Ranking};
    use teamfit_core::suggestion::SwapSuggestion;

    fn calculator() -> FitnessCalculator {
        FitnessCalculator::default()
    }

    fn unwrap_swap(suggestion: Option<Suggestion>) -> SwapSuggestion {
        match suggestion {
            Some(Suggestion::Swap(s)) => s,
            other => panic!("expected a swap, got {other:?}"),
        }
    }

    /// Two full teams on `Pr1` led by S1 and T1. The other members are
    /// ranked `s_rank` and `t_rank` respectively.
    fn two_teams(s_rank: Ranking, t_rank: Ranking) -> (Vec<Student>, Vec<Team>) {
        let s = [
            student("S1", Ranking::Intermediate, Personality::Leader),
            student("S2", s_rank, Personality::Outgoing),
            student("S3", s_rank, Personality::Reserved),
            student("S4", s_rank, Personality::DetailOriented),
        ];
        let t = [
            student("T1", Ranking::Intermediate, Personality::Leader),
            student("T2", t_rank, Personality::Outgoing),
            student("T3", t_rank, Personality::Reserved),
            student("T4", t_rank, Personality::DetailOriented),
        ];
        let teams = vec![
            team(1, "Pr1", &s.iter().collect::<Vec<_>>()),
            team(2, "Pr1", &t.iter().collect::<Vec<_>>()),
        ];
        (s.into_iter().chain(t).collect(), teams)
    }

    fn roster(students: Vec<Student>, teams: Vec<Team>) -> RosterSnapshot {
        with_preferences(RosterSnapshot {
            students,
            teams,
            projects: vec![project("Pr1", Ranking::Intermediate)],
            preferences: vec![],
        })
    }

    #[test]
    fn swapping_a_team_with_itself_is_rejected() {
        let (students, teams) = two_teams(Ranking::Intermediate, Ranking::Intermediate);
        let result = SwapBetweenTeams::new(1, 1).analyze(&roster(students, teams), &calculator());
        assert!(matches!(result, Err(EngineError::InvalidRequest(_))));
    }

    #[test]
    fn leader_cannot_leave_for_a_non_leader() {
        let (students, teams) = two_teams(Ranking::Beginner, Ranking::Expert);
        let roster = roster(students, teams);
        let calc = calculator();
        let evaluator = Evaluator::new(&roster, &calc);
        let (first, second) = (&roster.teams[0], &roster.teams[1]);

        assert!(evaluator.swap(first, &first.members[0], second, &second.members[1]).is_none());
        assert!(evaluator.swap(first, &first.members[1], second, &second.members[0]).is_none());
        assert!(evaluator.swap(first, &first.members[0], second, &second.members[0]).is_some());
    }

    #[test]
    fn swap_score_is_mean_of_both_teams() {
        let (students, teams) = two_teams(Ranking::Beginner, Ranking::Expert);
        let roster = roster(students, teams);
        let suggestion = unwrap_swap(SwapBetweenTeams::new(1, 2).analyze(&roster, &calculator()).unwrap());

        let first = roster
            .team(1)
            .unwrap()
            .with_replacement(&suggestion.first_student.unique_id, suggestion.second_student.clone())
            .unwrap();
        let second = roster
            .team(2)
            .unwrap()
            .with_replacement(&suggestion.second_student.unique_id, suggestion.first_student.clone())
            .unwrap();
        let calc = calculator();
        let expected = f64::midpoint(
            calc.compute(&first, &roster.projects, &roster.preferences)
                .unwrap()
                .combined_score(),
            calc.compute(&second, &roster.projects, &roster.preferences)
                .unwrap()
                .combined_score(),
        );
        assert!((suggestion.score - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn conflicts_block_every_candidate() {
        let (students, mut teams) = two_teams(Ranking::Intermediate, Ranking::Intermediate);
        teams[0].members[0].conflicts.extend(["T2".to_string(), "T3".to_string()]);
        teams[1].members[0].conflicts.extend(["S2".to_string(), "S3".to_string()]);
        // A student lists at most two conflicters, so S4 and T4 leave the
        // search by having no preference record.
        let mut roster = roster(students, teams);
        roster
            .preferences
            .retain(|p| p.student_unique_id != "S4" && p.student_unique_id != "T4");

        assert_eq!(SwapBetweenTeams::new(1, 2).analyze(&roster, &calculator()).unwrap(), None);
    }

    #[test]
    fn all_pairs_matches_single_pair_with_two_teams() {
        let (students, teams) = two_teams(Ranking::Beginner, Ranking::Expert);
        let roster = roster(students, teams);
        assert_eq!(
            SwapAcrossAllPairs.analyze(&roster, &calculator()).unwrap(),
            SwapBetweenTeams::new(1, 2).analyze(&roster, &calculator()).unwrap()
        );
    }

    #[test]
    fn second_team_for_only_swaps_with_fixed_team() {
        let (mut students, mut teams) = two_teams(Ranking::Beginner, Ranking::Expert);
        let u = [
            student("U1", Ranking::Intermediate, Personality::Leader),
            student("U2", Ranking::Beginner, Personality::Outgoing),
            student("U3", Ranking::Beginner, Personality::Reserved),
            student("U4", Ranking::Beginner, Personality::DetailOriented),
        ];
        teams.push(team(3, "Pr1", &u.iter().collect::<Vec<_>>()));
        students.extend(u);
        let roster = roster(students, teams);

        // Team 1 matches team 3's skills, so any swap with it keeps the
        // pair's mean below every swap with the Expert team.
        let suggestion = unwrap_swap(SecondTeamFor::new(3).analyze(&roster, &calculator()).unwrap());
        assert_eq!(suggestion.first_team_id, 3);
        assert_eq!(suggestion.second_team_id, 1);
    }
}
