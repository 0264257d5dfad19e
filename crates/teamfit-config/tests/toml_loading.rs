//! Integration tests for TOML configuration loading and env overrides.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use teamfit_config::{ConfigError, TeamfitConfig};
use teamfit_core::enums::RoundingMode;

fn layered(file: &str) -> Figment {
    Figment::from(Serialized::defaults(TeamfitConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed("TEAMFIT_").split("__"))
}

#[test]
fn loads_fitness_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[fitness]
rounding = "half_even"
competency_precision = 2
satisfaction_precision = 1
shortfall_precision = 4
"#,
        )?;

        let config: TeamfitConfig = layered("config.toml").extract()?;

        assert_eq!(config.fitness.rounding, RoundingMode::HalfEven);
        assert_eq!(config.fitness.competency_precision, 2);
        assert_eq!(config.fitness.satisfaction_precision, 1);
        assert_eq!(config.fitness.shortfall_precision, 4);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[maintenance]
enabled = true
",
        )?;

        let config: TeamfitConfig = layered("config.toml").extract()?;

        assert!(config.maintenance.enabled);
        assert_eq!(config.maintenance.interval_secs, 900);
        assert_eq!(config.worker.queue_depth, 16);
        assert_eq!(config.fitness.rounding, RoundingMode::HalfUp);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[maintenance]
interval_secs = 60
",
        )?;
        jail.set_env("TEAMFIT_MAINTENANCE__INTERVAL_SECS", "5");
        jail.set_env("TEAMFIT_FITNESS__ROUNDING", "half_even");

        let config: TeamfitConfig = layered("config.toml").extract()?;

        assert_eq!(config.maintenance.interval_secs, 5);
        assert_eq!(config.fitness.rounding, RoundingMode::HalfEven);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".teamfit")?;
        jail.create_file(
            ".teamfit/config.toml",
            r"
[worker]
queue_depth = 4
",
        )?;

        let config = TeamfitConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.worker.queue_depth, 4);
        Ok(())
    });
}

#[test]
fn invalid_values_are_rejected_after_extraction() {
    Jail::expect_with(|jail| {
        jail.set_env("TEAMFIT_MAINTENANCE__INTERVAL_SECS", "0");

        let result = TeamfitConfig::from_figment(&TeamfitConfig::figment());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "maintenance.interval_secs"
        ));
        Ok(())
    });
}

#[test]
fn unknown_rounding_mode_fails_extraction() {
    Jail::expect_with(|jail| {
        jail.set_env("TEAMFIT_FITNESS__ROUNDING", "banker");

        let result = TeamfitConfig::from_figment(&TeamfitConfig::figment());
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
