//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
  let path = path.as_ref();

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  info!(
    path = %path.display(),
    preset = %config.scoring.preset_id(),
    max_goals = config.model.max_goals,
    high_cutoff = config.tiers.high_cutoff,
    mid_cutoff = config.tiers.mid_cutoff,
    lookup = config.lookup.enabled,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).context("Failed to parse config TOML")?;
  validate_config(&config)?;
  Ok(config)
}

/// Upper bound on the Poisson score grid.
const MAX_GOALS_LIMIT: u32 = 50;

/// Upper bound on lookup retries; the backoff doubles per attempt.
const MAX_RETRIES_LIMIT: u32 = 10;

/// Validate all configuration parameters.
///
/// Checks for:
/// - Ordered threshold pairs and tier cutoffs
/// - Valid fractions (0..1]
/// - Sensible input ranges
fn validate_config(config: &AppConfig) -> Result<()> {
  // Model validation
  anyhow::ensure!(
    (1..=MAX_GOALS_LIMIT).contains(&config.model.max_goals),
    "model.max_goals must be in [1, {}], got {}",
    MAX_GOALS_LIMIT,
    config.model.max_goals
  );
  anyhow::ensure!(
    config.model.halftime_fraction > 0.0 && config.model.halftime_fraction <= 1.0,
    "model.halftime_fraction must be in (0, 1], got {}",
    config.model.halftime_fraction
  );
  anyhow::ensure!(
    (0.0..1.0).contains(&config.model.halftime_penalty),
    "model.halftime_penalty must be in [0, 1), got {}",
    config.model.halftime_penalty
  );

  // Threshold validation
  let errors = config.scoring.thresholds().ordering_errors();
  anyhow::ensure!(
    errors.is_empty(),
    "Scoring thresholds out of order: {}",
    errors.join("; ")
  );

  // Tier validation
  let core_layers = crate::domain::layers::LayerKind::CORE.len() as f64;
  anyhow::ensure!(
    config.tiers.mid_cutoff >= 0.0
      && config.tiers.mid_cutoff <= config.tiers.high_cutoff
      && config.tiers.high_cutoff <= core_layers,
    "Tier cutoffs must satisfy 0 <= mid ({}) <= high ({}) <= {}",
    config.tiers.mid_cutoff,
    config.tiers.high_cutoff,
    core_layers
  );

  // Kelly validation
  anyhow::ensure!(
    config.kelly.fraction > 0.0 && config.kelly.fraction <= 1.0,
    "Kelly fraction must be in (0, 1], got {}",
    config.kelly.fraction
  );
  anyhow::ensure!(
    config.kelly.max_fraction > 0.0 && config.kelly.max_fraction <= 1.0,
    "Kelly max_fraction must be in (0, 1], got {}",
    config.kelly.max_fraction
  );

  // Input limits validation
  anyhow::ensure!(
    config.limits.odds_min > 1.0 && config.limits.odds_min < config.limits.odds_max,
    "limits: require 1.0 < odds_min ({}) < odds_max ({})",
    config.limits.odds_min,
    config.limits.odds_max
  );
  anyhow::ensure!(
    config.limits.h2h_window > 0,
    "limits.h2h_window must be positive"
  );

  // Lookup validation
  anyhow::ensure!(
    config.lookup.max_retries <= MAX_RETRIES_LIMIT,
    "lookup.max_retries must be at most {}, got {}",
    MAX_RETRIES_LIMIT,
    config.lookup.max_retries
  );
  if config.lookup.enabled {
    anyhow::ensure!(
      !config.lookup.base_url.is_empty(),
      "lookup.base_url must not be empty"
    );
    anyhow::ensure!(
      config.lookup.requests_per_minute > 0,
      "lookup.requests_per_minute must be positive"
    );
  }

  anyhow::ensure!(
    config.batch.max_concurrent > 0,
    "batch.max_concurrent must be positive"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::thresholds::ThresholdPreset;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_empty_config_uses_defaults() {
    let config = parse_config("").unwrap();
    assert_eq!(config.model.max_goals, 10);
    assert_eq!(config.tiers.high_cutoff, 6.0);
    assert_eq!(config.tiers.mid_cutoff, 5.0);
    assert_eq!(config.scoring.preset, ThresholdPreset::Standard);
    assert_eq!(config.scoring.preset_id(), "standard-v1");
    assert!(!config.lookup.enabled);
  }

  #[test]
  fn test_preset_and_overrides() {
    let config = parse_config(
      r#"
      [scoring]
      preset = "strict"

      [scoring.overrides]
      table_gap_pass_max = 2
      "#,
    )
    .unwrap();
    let t = config.scoring.thresholds();
    assert_eq!(t.odds.pass_max, 3.3);
    assert_eq!(t.table_gap.pass_max, 2.0);
    assert_eq!(config.scoring.preset_id(), "strict-v1+custom");
  }

  #[test]
  fn test_unknown_override_rejected() {
    let result = parse_config(
      r#"
      [scoring.overrides]
      nonsense = 1.0
      "#,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_inverted_cutoffs_rejected() {
    let result = parse_config(
      r#"
      [tiers]
      high_cutoff = 4.0
      mid_cutoff = 5.0
      "#,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_unordered_thresholds_rejected() {
    let result = parse_config(
      r#"
      [scoring.overrides]
      odds_pass_min = 3.8
      "#,
    );
    let err = format!("{:#}", result.unwrap_err());
    assert!(err.contains("odds"), "{err}");
  }

  #[test]
  fn test_max_goals_range() {
    let at_limit = parse_config("[model]\nmax_goals = 50\n").unwrap();
    assert_eq!(at_limit.model.max_goals, 50);
    let err = format!("{:#}", parse_config("[model]\nmax_goals = 500\n").unwrap_err());
    assert!(err.contains("model.max_goals"), "{err}");
  }

  #[test]
  fn test_max_retries_bounded_even_when_lookup_disabled() {
    let at_limit = parse_config("[lookup]\nmax_retries = 10\n").unwrap();
    assert_eq!(at_limit.lookup.max_retries, 10);
    let err = format!("{:#}", parse_config("[lookup]\nmax_retries = 40\n").unwrap_err());
    assert!(err.contains("lookup.max_retries"), "{err}");
  }
}
