use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Personality, Ranking, SkillCategory};
use crate::errors::CoreError;

/// Maximum number of conflicters a student may declare.
pub const MAX_CONFLICTS: usize = 2;

/// One ranking per skill category.
///
/// Used both for a student's self-reported competencies and for a project's
/// skill demand profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct SkillProfile {
    pub programming: Ranking,
    pub networking: Ranking,
    pub analytics: Ranking,
    pub web_development: Ranking,
}

impl SkillProfile {
    #[must_use]
    pub const fn new(
        programming: Ranking,
        networking: Ranking,
        analytics: Ranking,
        web_development: Ranking,
    ) -> Self {
        Self {
            programming,
            networking,
            analytics,
            web_development,
        }
    }

    /// Same ranking in every category.
    #[must_use]
    pub const fn uniform(ranking: Ranking) -> Self {
        Self::new(ranking, ranking, ranking, ranking)
    }

    #[must_use]
    pub const fn get(&self, category: SkillCategory) -> Ranking {
        match category {
            SkillCategory::Programming => self.programming,
            SkillCategory::Networking => self.networking,
            SkillCategory::Analytics => self.analytics,
            SkillCategory::WebDevelopment => self.web_development,
        }
    }

    /// Rankings paired with their category, in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, Ranking)> + '_ {
        SkillCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// A person to be placed on a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Student {
    pub id: u32,
    /// External unique code, e.g. `S1`. Immutable once assigned.
    pub unique_id: String,
    pub skills: SkillProfile,
    pub personality: Option<Personality>,
    /// Unique codes of students this student refuses to work with.
    ///
    /// Refusal is one-directional as declared; callers keep it symmetric.
    #[serde(default)]
    pub conflicts: BTreeSet<String>,
}

impl Student {
    #[must_use]
    pub fn new(id: u32, unique_id: impl Into<String>, skills: SkillProfile) -> Self {
        Self {
            id,
            unique_id: unique_id.into(),
            skills,
            personality: None,
            conflicts: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = Some(personality);
        self
    }

    /// Declare a conflicter.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the student would refuse itself or
    /// exceed [`MAX_CONFLICTS`].
    pub fn with_conflict(mut self, unique_id: impl Into<String>) -> Result<Self, CoreError> {
        self.conflicts.insert(unique_id.into());
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn is_leader(&self) -> bool {
        self.personality.is_some_and(Personality::is_leader)
    }

    /// Whether this student declared `unique_id` as a conflicter.
    #[must_use]
    pub fn refuses(&self, unique_id: &str) -> bool {
        self.conflicts.contains(unique_id)
    }

    /// Check the conflicter invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.unique_id.is_empty() {
            return Err(CoreError::Validation(format!(
                "student {} has an empty unique id",
                self.id
            )));
        }
        if self.conflicts.len() > MAX_CONFLICTS {
            return Err(CoreError::Validation(format!(
                "student {} declares {} conflicters (max {MAX_CONFLICTS})",
                self.unique_id,
                self.conflicts.len()
            )));
        }
        if self.refuses(&self.unique_id) {
            return Err(CoreError::Validation(format!(
                "student {} cannot conflict with itself",
                self.unique_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student::new(1, "S1", SkillProfile::uniform(Ranking::Intermediate))
    }

    #[test]
    fn profile_lookup_matches_fields() {
        let profile = SkillProfile::new(
            Ranking::Expert,
            Ranking::Beginner,
            Ranking::HighlySkilled,
            Ranking::Intermediate,
        );
        assert_eq!(profile.get(SkillCategory::Programming), Ranking::Expert);
        assert_eq!(profile.get(SkillCategory::Networking), Ranking::Beginner);
        assert_eq!(profile.get(SkillCategory::Analytics), Ranking::HighlySkilled);
        assert_eq!(profile.get(SkillCategory::WebDevelopment), Ranking::Intermediate);
        assert_eq!(profile.iter().count(), 4);
    }

    #[test]
    fn two_conflicts_allowed() {
        let s = student()
            .with_conflict("S2")
            .and_then(|s| s.with_conflict("S3"))
            .unwrap();
        assert!(s.refuses("S2"));
        assert!(s.refuses("S3"));
        assert!(!s.refuses("S4"));
    }

    #[test]
    fn third_conflict_rejected() {
        let result = student()
            .with_conflict("S2")
            .and_then(|s| s.with_conflict("S3"))
            .and_then(|s| s.with_conflict("S4"));
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn self_conflict_rejected() {
        assert!(student().with_conflict("S1").is_err());
    }

    #[test]
    fn leader_detection() {
        assert!(!student().is_leader());
        assert!(student().with_personality(Personality::Leader).is_leader());
        assert!(!student().with_personality(Personality::Reserved).is_leader());
    }
}
