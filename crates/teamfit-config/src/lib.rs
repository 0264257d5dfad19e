//! # teamfit-config
//!
//! Layered configuration loading for Teamfit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TEAMFIT_*` prefix, `__` as separator)
//! 2. Project-level `.teamfit/config.toml`
//! 3. User-level `~/.config/teamfit/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TEAMFIT_FITNESS__ROUNDING` -> `fitness.rounding`,
//! `TEAMFIT_MAINTENANCE__INTERVAL_SECS` -> `maintenance.interval_secs`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use teamfit_config::TeamfitConfig;
//!
//! let config = TeamfitConfig::load_with_dotenv().expect("config");
//! if config.maintenance.enabled {
//!     println!("recompute every {:?}", config.maintenance.interval());
//! }
//! ```

mod error;
mod fitness;
mod maintenance;
mod worker;

pub use error::ConfigError;
pub use fitness::{FitnessConfig, MAX_PRECISION};
pub use maintenance::MaintenanceConfig;
pub use worker::WorkerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TeamfitConfig {
    #[serde(default)]
    pub fitness: FitnessConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
    #[serde(default)]
    pub maintenance: MaintenanceConfig,
}

impl TeamfitConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment (tests layer their own
    /// providers on top of [`Self::figment`]).
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".teamfit/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TEAMFIT_").split("__"))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first out-of-range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fitness.validate()?;
        if self.worker.queue_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "worker.queue_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.maintenance.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "maintenance.interval_secs".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("teamfit").join("config.toml"))
    }

    /// Load `.env` from the workspace root, or the current directory.
    ///
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
