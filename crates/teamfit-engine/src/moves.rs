//! Applying and reversing suggestions.
//!
//! `commit` is the only place team membership changes. Each committed move is
//! recorded in the caller's [`History`] so `undo` can reverse it exactly.
//! Both functions check their preconditions before touching the roster, so a
//! failed call leaves it unchanged.
//!
//! After a membership change the touched teams' fitness is refreshed:
//! recomputed when the team is at capacity, cleared otherwise.

use teamfit_core::entities::{Preference, Project, Student, Team, TeamFitness};
use teamfit_core::enums::EntityKind;
use teamfit_core::errors::CoreError;
use teamfit_core::history::HistoryEntry;
use teamfit_core::roster::RosterSnapshot;
use teamfit_core::suggestion::{AssignmentSuggestion, Suggestion, SwapSuggestion};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::fitness::FitnessCalculator;
use crate::history::History;

/// Apply `suggestion` to `roster` and record it in `history`.
///
/// # Errors
///
/// Returns [`EngineError::Core`] when the suggestion no longer matches the
/// roster: an unknown team, a student who is already placed, or a swap
/// partner who has moved.
pub fn commit(
    roster: &mut RosterSnapshot,
    suggestion: &Suggestion,
    history: &mut History,
    calculator: &FitnessCalculator,
) -> Result<(), EngineError> {
    match suggestion {
        Suggestion::Assignment(a) => commit_assignment(roster, a)?,
        Suggestion::Swap(s) => commit_swap(roster, s)?,
    }

    let entry = suggestion.to_history_entry();
    for team_id in entry.team_ids() {
        refresh_fitness(roster, team_id, calculator);
    }
    info!(kind = entry.kind(), teams = ?entry.team_ids(), "committed move");
    history.push(entry);
    Ok(())
}

fn commit_assignment(roster: &mut RosterSnapshot, a: &AssignmentSuggestion) -> Result<(), EngineError> {
    if let Some(current) = roster.team_of(&a.student.unique_id) {
        return Err(CoreError::DuplicateMember {
            team_id: current.id,
            unique_id: a.student.unique_id.clone(),
        }
        .into());
    }

    let team = roster.team_mut(a.team_id)?;
    match &a.displaced {
        Some(out) => {
            team.replace_member(&out.unique_id, a.student.clone())?;
        }
        None => team.add_member(a.student.clone())?,
    }
    team.newly_created = false;
    Ok(())
}

fn commit_swap(roster: &mut RosterSnapshot, s: &SwapSuggestion) -> Result<(), EngineError> {
    exchange(
        roster,
        (s.first_team_id, &s.first_student),
        (s.second_team_id, &s.second_student),
    )
}

/// Reverse the most recent move in `history`.
///
/// Returns the reversed entry. If the entry cannot be applied to the roster
/// it is pushed back onto `history`.
///
/// # Errors
///
/// Returns [`EngineError::EmptyHistory`] when nothing has been recorded, or
/// [`EngineError::Core`] when the roster has changed in a way that makes the
/// entry impossible to reverse.
pub fn undo(
    roster: &mut RosterSnapshot,
    history: &mut History,
    calculator: &FitnessCalculator,
) -> Result<HistoryEntry, EngineError> {
    let entry = history.pop()?;
    if let Err(e) = reverse(roster, &entry) {
        history.push(entry);
        return Err(e);
    }

    for team_id in entry.team_ids() {
        refresh_fitness(roster, team_id, calculator);
    }
    info!(kind = entry.kind(), teams = ?entry.team_ids(), "undid move");
    Ok(entry)
}

fn reverse(roster: &mut RosterSnapshot, entry: &HistoryEntry) -> Result<(), EngineError> {
    match entry {
        HistoryEntry::Assignment {
            team_id,
            student,
            displaced: Some(displaced),
        } => {
            if let Some(current) = roster.team_of(&displaced.unique_id) {
                return Err(CoreError::DuplicateMember {
                    team_id: current.id,
                    unique_id: displaced.unique_id.clone(),
                }
                .into());
            }
            roster
                .team_mut(*team_id)?
                .replace_member(&student.unique_id, displaced.clone())?;
        }
        HistoryEntry::Assignment {
            team_id,
            student,
            displaced: None,
        } => {
            let index = roster
                .teams
                .iter()
                .position(|t| t.id == *team_id)
                .ok_or_else(|| CoreError::NotFound {
                    kind: EntityKind::Team,
                    id: team_id.to_string(),
                })?;
            let team = &mut roster.teams[index];
            team.remove_member(&student.unique_id)?;
            if team.is_empty() {
                roster.teams.remove(index);
            }
        }
        HistoryEntry::Swap {
            first_team_id,
            first_student,
            second_team_id,
            second_student,
        } => {
            // Each student now sits on the other's original team.
            exchange(
                roster,
                (*first_team_id, second_student),
                (*second_team_id, first_student),
            )?;
        }
    }
    Ok(())
}

/// Move `a` off team `a.0` onto team `b.0` and `b` the other way, each taking
/// the other's slot.
fn exchange(
    roster: &mut RosterSnapshot,
    (first_id, a): (u32, &Student),
    (second_id, b): (u32, &Student),
) -> Result<(), EngineError> {
    if first_id == second_id {
        return Err(EngineError::InvalidRequest(format!(
            "cannot swap team {first_id} with itself"
        )));
    }
    let (first, second) = (roster.team(first_id)?, roster.team(second_id)?);
    ensure_member(first, &a.unique_id)?;
    ensure_member(second, &b.unique_id)?;
    ensure_absent(second, &a.unique_id)?;
    ensure_absent(first, &b.unique_id)?;

    let leaving_first = roster.team_mut(first_id)?.replace_member(&a.unique_id, b.clone())?;
    roster.team_mut(second_id)?.replace_member(&b.unique_id, leaving_first)?;
    Ok(())
}

fn ensure_member(team: &Team, unique_id: &str) -> Result<(), CoreError> {
    if team.contains(unique_id) {
        Ok(())
    } else {
        Err(CoreError::NotAMember {
            team_id: team.id,
            unique_id: unique_id.to_string(),
        })
    }
}

fn ensure_absent(team: &Team, unique_id: &str) -> Result<(), CoreError> {
    if team.contains(unique_id) {
        Err(CoreError::DuplicateMember {
            team_id: team.id,
            unique_id: unique_id.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Recompute fitness for a full team, clear it otherwise.
///
/// A team that has been deleted is ignored. A compute failure is logged and
/// leaves the fitness cleared.
fn refresh_fitness(roster: &mut RosterSnapshot, team_id: u32, calculator: &FitnessCalculator) {
    let RosterSnapshot {
        teams,
        projects,
        preferences,
        ..
    } = roster;
    if let Some(team) = teams.iter_mut().find(|t| t.id == team_id) {
        team.fitness = fitness_for(team, projects, preferences, calculator);
    }
}

fn fitness_for(
    team: &Team,
    projects: &[Project],
    preferences: &[Preference],
    calculator: &FitnessCalculator,
) -> Option<TeamFitness> {
    if !team.is_full() {
        return None;
    }
    calculator
        .compute(team, projects, preferences)
        .inspect_err(|e| warn!(team_id = team.id, error = %e, "could not recompute team fitness"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::{project, student, team, with_preferences};
    use pretty_assertions::assert_eq;
    use teamfit_core::enums::{Personality, Ranking};

    fn codes(team: &Team) -> Vec<String> {
        let mut codes: Vec<String> = team.members.iter().map(|m| m.unique_id.clone()).collect();
        codes.sort();
        codes
    }

    /// Team 1 holds S1..S3, team 2 holds T1..T4, S9 is unassigned.
    fn roster() -> RosterSnapshot {
        let s: Vec<Student> = ["S1", "S2", "S3"]
            .into_iter()
            .zip([Personality::Leader, Personality::Outgoing, Personality::Reserved])
            .map(|(c, p)| student(c, Ranking::Intermediate, p))
            .collect();
        let t: Vec<Student> = ["T1", "T2", "T3", "T4"]
            .into_iter()
            .zip([
                Personality::Leader,
                Personality::Outgoing,
                Personality::Reserved,
                Personality::DetailOriented,
            ])
            .map(|(c, p)| student(c, Ranking::Expert, p))
            .collect();
        let newcomer = student("S9", Ranking::Beginner, Personality::DetailOriented);

        with_preferences(RosterSnapshot {
            teams: vec![
                team(1, "Pr1", &s.iter().collect::<Vec<_>>()),
                team(2, "Pr1", &t.iter().collect::<Vec<_>>()),
            ],
            students: s.into_iter().chain(t).chain([newcomer]).collect(),
            projects: vec![project("Pr1", Ranking::Intermediate)],
            preferences: vec![],
        })
    }

    fn assign(roster: &RosterSnapshot, team_id: u32, code: &str, displaced: Option<&str>) -> Suggestion {
        Suggestion::Assignment(AssignmentSuggestion {
            team_id,
            student: roster.student(code).unwrap().clone(),
            displaced: displaced.map(|d| roster.student(d).unwrap().clone()),
            score: 0.0,
        })
    }

    fn swap(roster: &RosterSnapshot, a: (u32, &str), b: (u32, &str)) -> Suggestion {
        Suggestion::Swap(SwapSuggestion {
            first_team_id: a.0,
            first_student: roster.student(a.1).unwrap().clone(),
            second_team_id: b.0,
            second_student: roster.student(b.1).unwrap().clone(),
            score: 0.0,
        })
    }

    #[test]
    fn assignment_filling_a_team_computes_fitness() {
        let mut roster = roster();
        let mut history = History::new();
        let calc = FitnessCalculator::default();

        let suggestion = assign(&roster, 1, "S9", None);
        commit(&mut roster, &suggestion, &mut history, &calc).unwrap();

        let team = roster.team(1).unwrap();
        assert_eq!(codes(team), vec!["S1", "S2", "S3", "S9"]);
        assert!(team.fitness.is_some());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn undo_plain_assignment_clears_fitness() {
        let mut roster = roster();
        let mut history = History::new();
        let calc = FitnessCalculator::default();
        let suggestion = assign(&roster, 1, "S9", None);
        commit(&mut roster, &suggestion, &mut history, &calc).unwrap();

        let entry = undo(&mut roster, &mut history, &calc).unwrap();

        assert_eq!(entry.kind(), "assignment");
        let team = roster.team(1).unwrap();
        assert_eq!(codes(team), vec!["S1", "S2", "S3"]);
        assert!(team.fitness.is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn undo_displacement_restores_members() {
        let mut roster = roster();
        let mut history = History::new();
        let calc = FitnessCalculator::default();
        let before = codes(roster.team(2).unwrap());

        let suggestion = assign(&roster, 2, "S9", Some("T4"));
        commit(&mut roster, &suggestion, &mut history, &calc).unwrap();
        assert!(roster.team(2).unwrap().contains("S9"));
        assert!(roster.team_of("T4").is_none());

        undo(&mut roster, &mut history, &calc).unwrap();
        let team = roster.team(2).unwrap();
        assert_eq!(codes(team), before);
        assert!(team.fitness.is_some());
    }

    #[test]
    fn undo_swap_restores_both_teams() {
        let mut roster = roster();
        let mut history = History::new();
        let calc = FitnessCalculator::default();
        let first_before = roster.team(1).unwrap().members.clone();
        let second_before = roster.team(2).unwrap().members.clone();

        let suggestion = swap(&roster, (1, "S2"), (2, "T2"));
        commit(&mut roster, &suggestion, &mut history, &calc).unwrap();
        assert!(roster.team(1).unwrap().contains("T2"));
        assert!(roster.team(2).unwrap().contains("S2"));

        undo(&mut roster, &mut history, &calc).unwrap();
        assert_eq!(roster.team(1).unwrap().members, first_before);
        assert_eq!(roster.team(2).unwrap().members, second_before);
    }

    #[test]
    fn undo_removes_team_left_empty() {
        let mut roster = roster();
        roster.teams.push(Team::pending(3, "Pr1"));
        let mut history = History::new();
        let calc = FitnessCalculator::default();

        let suggestion = assign(&roster, 3, "S9", None);
        commit(&mut roster, &suggestion, &mut history, &calc).unwrap();
        assert!(!roster.team(3).unwrap().newly_created);

        undo(&mut roster, &mut history, &calc).unwrap();
        assert!(roster.team(3).is_err());
    }

    #[test]
    fn undo_removes_only_the_emptied_team() {
        let mut roster = roster();
        let leader = student("L1", Ranking::Expert, Personality::Leader);
        roster.students.push(leader.clone());
        roster.teams.push(Team::pending(5, "Pr1"));
        roster.teams.push(team(5, "Pr1", &[&leader]));
        let mut history = History::new();
        let calc = FitnessCalculator::default();

        let suggestion = assign(&roster, 5, "S9", None);
        commit(&mut roster, &suggestion, &mut history, &calc).unwrap();
        undo(&mut roster, &mut history, &calc).unwrap();

        let fives: Vec<&Team> = roster.teams.iter().filter(|t| t.id == 5).collect();
        assert_eq!(fives.len(), 1);
        assert!(fives[0].contains("L1"));
        assert_eq!(roster.team_of("L1").map(|t| t.id), Some(5));
        assert!(roster.team_of("S9").is_none());
    }

    #[test]
    fn swap_with_student_on_both_teams_changes_nothing() {
        let mut roster = roster();
        let s2 = roster.student("S2").unwrap().clone();
        roster.team_mut(2).unwrap().members[3] = s2;
        let before = roster.clone();
        let mut history = History::new();

        let suggestion = swap(&roster, (1, "S2"), (2, "T2"));
        let result = commit(&mut roster, &suggestion, &mut history, &FitnessCalculator::default());

        assert!(matches!(
            result,
            Err(EngineError::Core(CoreError::DuplicateMember { team_id: 2, .. }))
        ));
        assert_eq!(roster, before);
        assert!(history.is_empty());
    }

    #[test]
    fn undo_on_empty_history() {
        let mut roster = roster();
        let result = undo(&mut roster, &mut History::new(), &FitnessCalculator::default());
        assert!(matches!(result, Err(EngineError::EmptyHistory)));
    }

    #[test]
    fn failed_undo_keeps_entry() {
        let mut roster = roster();
        let mut history = History::new();
        let calc = FitnessCalculator::default();
        let suggestion = swap(&roster, (1, "S2"), (2, "T2"));
        commit(&mut roster, &suggestion, &mut history, &calc).unwrap();

        // T2 leaves team 1 outside the engine.
        roster.team_mut(1).unwrap().remove_member("T2").unwrap();
        let snapshot = roster.clone();

        assert!(undo(&mut roster, &mut history, &calc).is_err());
        assert_eq!(history.len(), 1);
        assert_eq!(roster, snapshot);
    }

    #[test]
    fn assigning_a_placed_student_fails_without_changes() {
        let mut roster = roster();
        let mut history = History::new();
        let before = roster.clone();

        let suggestion = assign(&roster, 1, "T1", None);
        let result = commit(&mut roster, &suggestion, &mut history, &FitnessCalculator::default());

        assert!(matches!(
            result,
            Err(EngineError::Core(CoreError::DuplicateMember { team_id: 2, .. }))
        ));
        assert_eq!(roster, before);
        assert!(history.is_empty());
    }
}
