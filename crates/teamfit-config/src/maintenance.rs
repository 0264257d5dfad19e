//! Background fitness recompute configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default recompute interval: 15 minutes.
const fn default_interval_secs() -> u64 {
    900
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MaintenanceConfig {
    /// Whether the periodic recompute task should be started.
    #[serde(default)]
    pub enabled: bool,

    /// Seconds between recompute cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_interval_secs(),
        }
    }
}

impl MaintenanceConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = MaintenanceConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.interval(), Duration::from_secs(15 * 60));
    }
}
