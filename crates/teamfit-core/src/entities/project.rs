use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::SkillProfile;

/// A project teams are formed around, with its skill demand profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    pub id: u32,
    /// External unique code, e.g. `Pr1`.
    pub unique_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Owning entity (company or staff member).
    pub owner: String,
    /// Required ranking per skill category.
    pub requirements: SkillProfile,
}
