use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SkillCategory;

/// Share of members placed on a project they rated highly, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PreferenceSatisfaction {
    /// Members whose project is in their first or second band.
    pub overall: f64,
    pub first: f64,
    pub second: f64,
}

/// Fitness metrics of a team at capacity.
///
/// Present on a [`Team`](super::Team) only while it holds exactly
/// [`TEAM_CAPACITY`](super::TEAM_CAPACITY) members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamFitness {
    pub team_id: u32,
    pub average_competency: f64,
    pub competency_by_skill: BTreeMap<SkillCategory, f64>,
    pub satisfaction: PreferenceSatisfaction,
    pub average_shortfall: f64,
    /// Shortfall against every project in the catalog, keyed by project unique code.
    pub shortfall_by_project: BTreeMap<String, f64>,
}

impl TeamFitness {
    /// Combined score used to rank candidate moves: the mean of average
    /// competency, overall satisfaction, and average shortfall.
    #[must_use]
    pub fn combined_score(&self) -> f64 {
        (self.average_competency + self.satisfaction.overall + self.average_shortfall) / 3.0
    }
}
