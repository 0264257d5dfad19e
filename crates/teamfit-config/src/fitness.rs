//! Fitness metric rounding configuration.

use serde::{Deserialize, Serialize};
use teamfit_core::enums::RoundingMode;

use crate::error::ConfigError;

/// Largest precision accepted for any metric.
pub const MAX_PRECISION: u32 = 9;

const fn default_competency_precision() -> u32 {
    3
}

const fn default_satisfaction_precision() -> u32 {
    2
}

const fn default_shortfall_precision() -> u32 {
    3
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FitnessConfig {
    /// Rounding applied to every published metric.
    #[serde(default)]
    pub rounding: RoundingMode,

    /// Decimal places for skill competency values.
    #[serde(default = "default_competency_precision")]
    pub competency_precision: u32,

    /// Decimal places for preference satisfaction percentages.
    #[serde(default = "default_satisfaction_precision")]
    pub satisfaction_precision: u32,

    /// Decimal places for skill shortfall values.
    #[serde(default = "default_shortfall_precision")]
    pub shortfall_precision: u32,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::default(),
            competency_precision: default_competency_precision(),
            satisfaction_precision: default_satisfaction_precision(),
            shortfall_precision: default_shortfall_precision(),
        }
    }
}

impl FitnessConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if any precision exceeds [`MAX_PRECISION`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("fitness.competency_precision", self.competency_precision),
            ("fitness.satisfaction_precision", self.satisfaction_precision),
            ("fitness.shortfall_precision", self.shortfall_precision),
        ] {
            if value > MAX_PRECISION {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("{value} exceeds the maximum of {MAX_PRECISION} decimal places"),
                });
            }
        }
        Ok(())
    }
}
