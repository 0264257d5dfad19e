//! Skill, ranking, and personality vocabulary for Teamfit.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Enums with a fixed ordering expose `ALL` so callers can iterate categories
//! deterministically.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// SkillCategory
// ---------------------------------------------------------------------------

/// One of the four skill categories a student self-reports against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Networking,
    Analytics,
    WebDevelopment,
}

impl SkillCategory {
    /// Every category, in canonical order.
    pub const ALL: [Self; 4] = [
        Self::Programming,
        Self::Networking,
        Self::Analytics,
        Self::WebDevelopment,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Programming => "programming",
            Self::Networking => "networking",
            Self::Analytics => "analytics",
            Self::WebDevelopment => "web_development",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Self-reported (student) or required (project) competency level.
///
/// ```text
/// beginner (1) < intermediate (2) < highly_skilled (3) < expert (4)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    Beginner,
    Intermediate,
    HighlySkilled,
    Expert,
}

impl Ranking {
    /// Numeric level on the 1..=4 scale.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::HighlySkilled => 3,
            Self::Expert => 4,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::HighlySkilled => "highly_skilled",
            Self::Expert => "expert",
        }
    }
}

impl TryFrom<u8> for Ranking {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Beginner),
            2 => Ok(Self::Intermediate),
            3 => Ok(Self::HighlySkilled),
            4 => Ok(Self::Expert),
            other => Err(CoreError::Validation(format!(
                "ranking must be between 1 and 4, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

/// Personality category captured once per student.
///
/// Exactly one category, [`Personality::Leader`], satisfies the leadership
/// requirement enforced when a team is one slot from capacity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Leader,
    Outgoing,
    DetailOriented,
    Reserved,
}

impl Personality {
    /// Every category, in canonical order.
    pub const ALL: [Self; 4] = [
        Self::Leader,
        Self::Outgoing,
        Self::DetailOriented,
        Self::Reserved,
    ];

    #[must_use]
    pub const fn is_leader(self) -> bool {
        matches!(self, Self::Leader)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Outgoing => "outgoing",
            Self::DetailOriented => "detail_oriented",
            Self::Reserved => "reserved",
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RoundingMode
// ---------------------------------------------------------------------------

/// Rounding applied to every published fitness metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties round away from zero (all metrics are non-negative, so upward).
    #[default]
    HalfUp,
    /// Ties round to the nearest even digit.
    HalfEven,
}

impl RoundingMode {
    /// Round `value` to `places` decimal places.
    #[must_use]
    pub fn round(self, value: f64, places: u32) -> f64 {
        let factor = 10f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
        let scaled = value * factor;
        let rounded = match self {
            Self::HalfUp => scaled.round(),
            Self::HalfEven => scaled.round_ties_even(),
        };
        rounded / factor
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HalfUp => "half_up",
            Self::HalfEven => "half_even",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Entity kinds known to the roster, used for error messages and by storage
/// collaborators that need a resource name per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Student,
    Project,
    Preference,
    Team,
    TeamFitness,
}

impl EntityKind {
    /// Storage resource name for each entity kind.
    ///
    /// Persistence layers behind the engine's `FitnessStore` trait key their
    /// tables or collections by this name.
    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::Student => "students",
            Self::Project => "projects",
            Self::Preference => "preferences",
            Self::Team => "teams",
            Self::TeamFitness => "team_fitness",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Project => "project",
            Self::Preference => "preference",
            Self::Team => "team",
            Self::TeamFitness => "team_fitness",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
