use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Rating that places a project in a student's first-preference band.
pub const FIRST_PREFERENCE_RATING: u8 = 4;
/// Rating that places a project in a student's second-preference band.
pub const SECOND_PREFERENCE_RATING: u8 = 3;

/// Where a project falls among a student's stated preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceBand {
    First,
    Second,
    Lower,
    Unrated,
}

/// One student's ratings of the project catalog.
///
/// Ratings run from 1 (disliked) to 4 (most preferred). The map key is the
/// project unique code, so there is at most one rating per project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Preference {
    pub id: u32,
    pub student_unique_id: String,
    #[serde(default)]
    pub ratings: BTreeMap<String, u8>,
}

impl Preference {
    #[must_use]
    pub fn new(id: u32, student_unique_id: impl Into<String>) -> Self {
        Self {
            id,
            student_unique_id: student_unique_id.into(),
            ratings: BTreeMap::new(),
        }
    }

    /// Add a rating for a project.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the rating is outside 1..=4 or the
    /// project was already rated.
    pub fn with_rating(mut self, project_id: impl Into<String>, rating: u8) -> Result<Self, CoreError> {
        let project_id = project_id.into();
        Self::check_rating(&project_id, rating)?;
        if self.ratings.contains_key(&project_id) {
            return Err(CoreError::Validation(format!(
                "student {} already rated project {project_id}",
                self.student_unique_id
            )));
        }
        self.ratings.insert(project_id, rating);
        Ok(self)
    }

    #[must_use]
    pub fn rating_for(&self, project_id: &str) -> Option<u8> {
        self.ratings.get(project_id).copied()
    }

    /// Preference band of `project_id` for this student.
    #[must_use]
    pub fn band_for(&self, project_id: &str) -> PreferenceBand {
        match self.rating_for(project_id) {
            Some(FIRST_PREFERENCE_RATING) => PreferenceBand::First,
            Some(SECOND_PREFERENCE_RATING) => PreferenceBand::Second,
            Some(_) => PreferenceBand::Lower,
            None => PreferenceBand::Unrated,
        }
    }

    /// Check every rating is within range (deserialized records skip the builder).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for the first out-of-range rating.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.ratings
            .iter()
            .try_for_each(|(project_id, rating)| Self::check_rating(project_id, *rating))
    }

    fn check_rating(project_id: &str, rating: u8) -> Result<(), CoreError> {
        if (1..=FIRST_PREFERENCE_RATING).contains(&rating) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "rating for project {project_id} must be between 1 and {FIRST_PREFERENCE_RATING}, got {rating}"
            )))
        }
    }
}
