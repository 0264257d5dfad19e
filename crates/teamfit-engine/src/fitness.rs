//! Team fitness calculator.
//!
//! Computes the three fitness dimensions of a team:
//! - skill competency against the team's own project,
//! - preference satisfaction split by first and second preference band,
//! - skill shortfall against every project in the catalog.
//!
//! All published values are rounded with the configured
//! [`RoundingMode`](teamfit_core::enums::RoundingMode) and
//! precision, so repeated calls on identical inputs yield identical values.

use std::collections::{BTreeMap, HashMap};

use teamfit_config::FitnessConfig;
use teamfit_core::entities::{
    Preference, PreferenceBand, PreferenceSatisfaction, Project, SkillProfile, Student, TEAM_CAPACITY,
    Team, TeamFitness,
};
use teamfit_core::enums::SkillCategory;

use crate::error::EngineError;

/// Computes [`TeamFitness`] values. Cheap to copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitnessCalculator {
    config: FitnessConfig,
}

impl FitnessCalculator {
    #[must_use]
    pub const fn new(config: FitnessConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &FitnessConfig {
        &self.config
    }

    /// Compute fitness for a team at exactly [`TEAM_CAPACITY`] members.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TeamNotFull`] if the team is not at capacity, or
    /// [`EngineError::ProjectNotFound`] if its project is not in `projects`.
    pub fn compute(
        &self,
        team: &Team,
        projects: &[Project],
        preferences: &[Preference],
    ) -> Result<TeamFitness, EngineError> {
        if team.len() != TEAM_CAPACITY {
            return Err(EngineError::TeamNotFull {
                team_id: team.id,
                members: team.len(),
                capacity: TEAM_CAPACITY,
            });
        }
        self.measure(team, projects, preferences)
    }

    /// Apply the fitness formulas to a team of any non-empty size.
    ///
    /// Used by the analyzers to score prospective teams that are not yet full.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyTeam`] for a team without members, or
    /// [`EngineError::ProjectNotFound`] if its project is not in `projects`.
    pub fn measure(
        &self,
        team: &Team,
        projects: &[Project],
        preferences: &[Preference],
    ) -> Result<TeamFitness, EngineError> {
        if team.is_empty() {
            return Err(EngineError::EmptyTeam { team_id: team.id });
        }
        let project = projects
            .iter()
            .find(|p| p.unique_id == team.project_id)
            .ok_or_else(|| EngineError::ProjectNotFound(team.project_id.clone()))?;

        let (average_competency, competency_by_skill) = self.competency(&team.members, &project.requirements);
        let satisfaction = self.satisfaction(&team.members, &team.project_id, preferences);
        let (average_shortfall, shortfall_by_project) = self.shortfall(&team.members, projects);

        Ok(TeamFitness {
            team_id: team.id,
            average_competency,
            competency_by_skill,
            satisfaction,
            average_shortfall,
            shortfall_by_project,
        })
    }

    /// Per-skill mean of `max(0, member - required + 1)`, and the mean of those.
    fn competency(
        &self,
        members: &[Student],
        requirements: &SkillProfile,
    ) -> (f64, BTreeMap<SkillCategory, f64>) {
        let per_skill: Vec<(SkillCategory, f64)> = SkillCategory::ALL
            .into_iter()
            .map(|category| {
                let required = i32::from(requirements.get(category).level());
                let values = members.iter().map(|m| {
                    let actual = i32::from(m.skills.get(category).level());
                    f64::from((actual - required + 1).max(0))
                });
                (category, mean(values))
            })
            .collect();

        let overall = mean(per_skill.iter().map(|(_, v)| *v));
        let places = self.config.competency_precision;
        (
            self.round(overall, places),
            per_skill
                .into_iter()
                .map(|(c, v)| (c, self.round(v, places)))
                .collect(),
        )
    }

    /// Percentages of members whose project sits in their first/second band.
    ///
    /// Members without a preference record are excluded from numerator and
    /// denominator alike.
    #[allow(clippy::cast_precision_loss)]
    fn satisfaction(
        &self,
        members: &[Student],
        project_id: &str,
        preferences: &[Preference],
    ) -> PreferenceSatisfaction {
        let by_student: HashMap<&str, &Preference> = preferences
            .iter()
            .map(|p| (p.student_unique_id.as_str(), p))
            .collect();

        let bands: Vec<PreferenceBand> = members
            .iter()
            .filter_map(|m| by_student.get(m.unique_id.as_str()))
            .map(|p| p.band_for(project_id))
            .collect();

        if bands.is_empty() {
            return PreferenceSatisfaction::default();
        }

        let rated = bands.len() as f64;
        let first = bands.iter().filter(|b| **b == PreferenceBand::First).count() as f64;
        let second = bands.iter().filter(|b| **b == PreferenceBand::Second).count() as f64;
        let places = self.config.satisfaction_precision;

        PreferenceSatisfaction {
            overall: self.round((first + second) / rated * 100.0, places),
            first: self.round(first / rated * 100.0, places),
            second: self.round(second / rated * 100.0, places),
        }
    }

    /// Mean deficit `max(0, required - member)` against every catalog project.
    fn shortfall(&self, members: &[Student], projects: &[Project]) -> (f64, BTreeMap<String, f64>) {
        let per_project: Vec<(&str, f64)> = projects
            .iter()
            .map(|project| {
                let per_skill = SkillCategory::ALL.into_iter().map(|category| {
                    let required = i32::from(project.requirements.get(category).level());
                    mean(members.iter().map(|m| {
                        let actual = i32::from(m.skills.get(category).level());
                        f64::from((required - actual).max(0))
                    }))
                });
                (project.unique_id.as_str(), mean(per_skill))
            })
            .collect();

        let overall = mean(per_project.iter().map(|(_, v)| *v));
        let places = self.config.shortfall_precision;
        (
            self.round(overall, places),
            per_project
                .into_iter()
                .map(|(id, v)| (id.to_string(), self.round(v, places)))
                .collect(),
        )
    }

    fn round(&self, value: f64, places: u32) -> f64 {
        self.config.rounding.round(value, places)
    }
}

/// Arithmetic mean; zero for an empty input.
#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
