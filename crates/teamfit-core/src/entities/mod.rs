//! Entity structs for all Teamfit domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation. Students, projects, and preferences are
//! owned by the calling application; the engine only mutates team membership
//! and team fitness.

mod fitness;
mod preference;
mod project;
mod student;
mod team;

pub use fitness::{PreferenceSatisfaction, TeamFitness};
pub use preference::{FIRST_PREFERENCE_RATING, PreferenceBand, Preference, SECOND_PREFERENCE_RATING};
pub use project::Project;
pub use student::{MAX_CONFLICTS, SkillProfile, Student};
pub use team::{TEAM_CAPACITY, Team};
