//! Configuration Module - TOML-based Predictor Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Every threshold, cutoff, and model parameter is externalized
//! here - the domain layer only sees resolved values.

pub mod loader;

use serde::Deserialize;

use crate::domain::poisson::{HalftimeModel, PoissonDrawModel};
use crate::domain::scorer::{TierCutoffs, VerdictScorer};
use crate::domain::thresholds::{LayerThresholds, ThresholdOverrides, ThresholdPreset};

/// Top-level predictor configuration.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Identity and logging.
  pub app: AppSection,
  /// Poisson model parameters.
  pub model: ModelConfig,
  /// Layer thresholds (preset + overrides).
  pub scoring: ScoringConfig,
  /// Tier cutoffs.
  pub tiers: TierConfig,
  /// Informational Kelly sizing.
  pub kelly: KellyConfig,
  /// Boundary validation ranges.
  pub limits: InputLimits,
  /// Third-party match-data lookups.
  pub lookup: LookupConfig,
  /// Batch scan settings.
  pub batch: BatchConfig,
}

impl AppConfig {
  /// Verdict scorer built from the resolved thresholds and cutoffs.
  pub fn scorer(&self) -> VerdictScorer {
    VerdictScorer::new(self.scoring.thresholds(), self.tiers.cutoffs())
  }
}

/// Identity and logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Human-readable instance name.
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Emit JSON log lines instead of human-readable ones.
  #[serde(default)]
  pub json_logs: bool,
}

impl Default for AppSection {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
      json_logs: false,
    }
  }
}

/// Poisson draw model configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
  /// Truncation bound of the score grid.
  #[serde(default = "default_max_goals")]
  pub max_goals: u32,
  /// Also compute the half-time draw probability.
  #[serde(default = "default_true")]
  pub halftime_enabled: bool,
  /// Fraction of the match elapsed at half-time.
  #[serde(default = "default_halftime_fraction")]
  pub halftime_fraction: f64,
  /// Subtracted from the half-time draw probability.
  #[serde(default = "default_halftime_penalty")]
  pub halftime_penalty: f64,
}

impl ModelConfig {
  pub fn draw_model(&self) -> PoissonDrawModel {
    PoissonDrawModel::new(self.max_goals)
  }

  pub fn halftime_model(&self) -> Option<HalftimeModel> {
    self
      .halftime_enabled
      .then(|| HalftimeModel::new(self.halftime_fraction, self.halftime_penalty))
  }
}

impl Default for ModelConfig {
  fn default() -> Self {
    Self {
      max_goals: default_max_goals(),
      halftime_enabled: true,
      halftime_fraction: default_halftime_fraction(),
      halftime_penalty: default_halftime_penalty(),
    }
  }
}

/// Layer threshold configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
  /// Named preset the thresholds start from.
  #[serde(default)]
  pub preset: ThresholdPreset,
  /// Individual scalars overriding the preset.
  #[serde(default)]
  pub overrides: ThresholdOverrides,
}

impl ScoringConfig {
  /// Preset values with overrides applied.
  pub fn thresholds(&self) -> LayerThresholds {
    self.overrides.apply(self.preset.thresholds())
  }

  /// Preset id recorded on each analysis. Overridden presets get a
  /// `+custom` suffix so records stay distinguishable.
  pub fn preset_id(&self) -> String {
    if self.overrides.is_empty() {
      self.preset.id()
    } else {
      format!("{}+custom", self.preset.id())
    }
  }
}

/// Tier cutoff configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TierConfig {
  /// Core score at or above which the verdict is STRONG.
  #[serde(default = "default_high_cutoff")]
  pub high_cutoff: f64,
  /// Core score at or above which the verdict is MODERATE.
  #[serde(default = "default_mid_cutoff")]
  pub mid_cutoff: f64,
}

impl TierConfig {
  pub fn cutoffs(&self) -> TierCutoffs {
    TierCutoffs::new(self.high_cutoff, self.mid_cutoff)
  }
}

impl Default for TierConfig {
  fn default() -> Self {
    Self {
      high_cutoff: default_high_cutoff(),
      mid_cutoff: default_mid_cutoff(),
    }
  }
}

/// Kelly sizing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct KellyConfig {
  /// Kelly fraction multiplier (0.25 = quarter-Kelly).
  #[serde(default = "default_kelly_fraction")]
  pub fraction: f64,
  /// Cap on the suggested bankroll share.
  #[serde(default = "default_kelly_max")]
  pub max_fraction: f64,
}

impl Default for KellyConfig {
  fn default() -> Self {
    Self {
      fraction: default_kelly_fraction(),
      max_fraction: default_kelly_max(),
    }
  }
}

/// Valid ranges for operator input. Values outside are clamped.
#[derive(Debug, Clone, Deserialize)]
pub struct InputLimits {
  #[serde(default = "default_odds_min")]
  pub odds_min: f64,
  #[serde(default = "default_odds_max")]
  pub odds_max: f64,
  #[serde(default = "default_table_gap_max")]
  pub table_gap_max: u32,
  /// Number of head-to-head meetings considered (K).
  #[serde(default = "default_h2h_window")]
  pub h2h_window: u32,
  #[serde(default = "default_count_max")]
  pub wins_max: u32,
  #[serde(default = "default_count_max")]
  pub scorelines_max: u32,
}

impl Default for InputLimits {
  fn default() -> Self {
    Self {
      odds_min: default_odds_min(),
      odds_max: default_odds_max(),
      table_gap_max: default_table_gap_max(),
      h2h_window: default_h2h_window(),
      wins_max: default_count_max(),
      scorelines_max: default_count_max(),
    }
  }
}

/// football-data.org lookup configuration.
///
/// The API key itself never lives in the file: `api_key_env` names the
/// environment variable the binary reads it from.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
  /// Fetch missing head-to-head / league figures.
  #[serde(default)]
  pub enabled: bool,
  /// API base URL.
  #[serde(default = "default_lookup_url")]
  pub base_url: String,
  /// Environment variable holding the API token.
  #[serde(default = "default_api_key_env")]
  pub api_key_env: String,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
  /// Maximum retries on 429 / 5xx.
  #[serde(default = "default_max_retries")]
  pub max_retries: u32,
  /// Free tier allows 10 requests per minute.
  #[serde(default = "default_requests_per_minute")]
  pub requests_per_minute: u32,
}

impl Default for LookupConfig {
  fn default() -> Self {
    Self {
      enabled: false,
      base_url: default_lookup_url(),
      api_key_env: default_api_key_env(),
      timeout_seconds: default_timeout(),
      max_retries: default_max_retries(),
      requests_per_minute: default_requests_per_minute(),
    }
  }
}

/// Batch scan configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
  /// Maximum analyses in flight at once.
  #[serde(default = "default_max_concurrent")]
  pub max_concurrent: usize,
}

impl Default for BatchConfig {
  fn default() -> Self {
    Self {
      max_concurrent: default_max_concurrent(),
    }
  }
}

// Default value functions for serde

fn default_name() -> String {
  "draw-predictor".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_true() -> bool {
  true
}

fn default_max_goals() -> u32 {
  crate::domain::poisson::DEFAULT_MAX_GOALS
}

fn default_halftime_fraction() -> f64 {
  crate::domain::poisson::DEFAULT_HALFTIME_FRACTION
}

fn default_halftime_penalty() -> f64 {
  crate::domain::poisson::DEFAULT_HALFTIME_PENALTY
}

fn default_high_cutoff() -> f64 {
  6.0
}

fn default_mid_cutoff() -> f64 {
  5.0
}

fn default_kelly_fraction() -> f64 {
  0.25
}

fn default_kelly_max() -> f64 {
  0.05
}

fn default_odds_min() -> f64 {
  1.5
}

fn default_odds_max() -> f64 {
  10.0
}

fn default_table_gap_max() -> u32 {
  20
}

fn default_h2h_window() -> u32 {
  5
}

fn default_count_max() -> u32 {
  10
}

fn default_lookup_url() -> String {
  "https://api.football-data.org".to_string()
}

fn default_api_key_env() -> String {
  "FOOTBALL_DATA_API_KEY".to_string()
}

fn default_timeout() -> u64 {
  15
}

fn default_max_retries() -> u32 {
  2
}

fn default_requests_per_minute() -> u32 {
  10
}

fn default_max_concurrent() -> usize {
  8
}
