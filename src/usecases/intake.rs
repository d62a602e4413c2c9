//! Intake - Boundary Validation of Operator Input
//!
//! Raw fixture values are checked here, before anything reaches the
//! engine:
//! - Goal histories are parsed; invalid tokens are filtered and reported
//! - Out-of-range numbers are clamped and reported
//! - Externally sourceable features stay `None` when not entered
//!
//! The engine itself never re-validates ranges.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::InputLimits;
use crate::domain::analysis::{DataWarning, Side};
use crate::domain::features::{ContextualFeatures, MatchContext};
use crate::domain::goals::GoalRecord;
use crate::ports::match_data::FixtureRef;

/// Goal history as entered: comma-separated text or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoalHistoryInput {
  Text(String),
  List(Vec<i64>),
}

impl GoalHistoryInput {
  fn to_record(&self) -> GoalRecord {
    match self {
      Self::Text(text) => GoalRecord::parse(text),
      Self::List(values) => {
        let text = values
          .iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join(",");
        GoalRecord::parse(&text)
      }
    }
  }
}

impl Default for GoalHistoryInput {
  fn default() -> Self {
    Self::Text(String::new())
  }
}

/// One fixture as entered by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureInput {
  pub home_team: String,
  pub away_team: String,
  #[serde(default)]
  pub home_goals: GoalHistoryInput,
  #[serde(default)]
  pub away_goals: GoalHistoryInput,
  /// Decimal draw odds.
  pub draw_odds: f64,
  #[serde(default)]
  pub table_gap: i64,
  #[serde(default)]
  pub combined_wins: i64,
  #[serde(default)]
  pub draw_scorelines: i64,
  #[serde(default)]
  pub h2h_draws: Option<i64>,
  /// Percent.
  #[serde(default)]
  pub league_draw_rate: Option<f64>,
  /// Overrides the goal density derived from the two goal histories.
  #[serde(default)]
  pub goal_density: Option<f64>,
  #[serde(default)]
  pub context: MatchContext,
  /// football-data.org match id, for head-to-head lookups.
  #[serde(default)]
  pub match_id: Option<u64>,
  /// football-data.org competition code, for league draw rate lookups.
  #[serde(default)]
  pub competition: Option<String>,
}

/// Input after boundary validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFixture {
  pub fixture: FixtureRef,
  pub home_goals: GoalRecord,
  pub away_goals: GoalRecord,
  /// Goal density here is only the operator override; the analyzer
  /// derives it otherwise.
  pub features: ContextualFeatures,
  pub warnings: Vec<DataWarning>,
}

impl FixtureInput {
  pub fn fixture_ref(&self) -> FixtureRef {
    FixtureRef {
      home_team: self.home_team.clone(),
      away_team: self.away_team.clone(),
      match_id: self.match_id,
      competition: self.competition.clone(),
    }
  }

  /// Parse, clamp, and collect warnings.
  pub fn validate(&self, limits: &InputLimits) -> ValidatedFixture {
    let mut warnings = Vec::new();

    let home_goals = self.home_goals.to_record();
    let away_goals = self.away_goals.to_record();
    for (side, record) in [(Side::Home, &home_goals), (Side::Away, &away_goals)] {
      if !record.rejected().is_empty() {
        warnings.push(DataWarning::RejectedGoalTokens {
          side,
          tokens: record.rejected().to_vec(),
        });
      }
      if record.is_empty() {
        warnings.push(DataWarning::InsufficientGoalHistory { side });
      }
    }

    let draw_odds = clamp_f64(
      "draw_odds",
      self.draw_odds,
      limits.odds_min,
      limits.odds_max,
      &mut warnings,
    );
    let table_gap = clamp_count("table_gap", self.table_gap, limits.table_gap_max, &mut warnings);
    let combined_wins =
      clamp_count("combined_wins", self.combined_wins, limits.wins_max, &mut warnings);
    let draw_scorelines = clamp_count(
      "draw_scorelines",
      self.draw_scorelines,
      limits.scorelines_max,
      &mut warnings,
    );
    let h2h_draws = self
      .h2h_draws
      .map(|d| clamp_count("h2h_draws", d, limits.h2h_window, &mut warnings));
    let league_draw_rate = self
      .league_draw_rate
      .map(|r| clamp_f64("league_draw_rate", r, 0.0, 100.0, &mut warnings));
    let goal_density = self
      .goal_density
      .map(|g| clamp_f64("goal_density", g, 0.0, 10.0, &mut warnings));

    ValidatedFixture {
      fixture: self.fixture_ref(),
      home_goals,
      away_goals,
      features: ContextualFeatures {
        draw_odds,
        table_gap,
        combined_wins,
        draw_scorelines,
        h2h_draws,
        league_draw_rate,
        goal_density,
        context: self.context,
      },
      warnings,
    }
  }
}

/// Clamp into `[lo, hi]`, recording a warning when the value moves.
/// Non-finite values land on `lo`.
pub fn clamp_f64(
  field: &str,
  value: f64,
  lo: f64,
  hi: f64,
  warnings: &mut Vec<DataWarning>,
) -> f64 {
  let clamped = if value.is_finite() { value.clamp(lo, hi) } else { lo };
  if clamped.to_bits() != value.to_bits() {
    warn!(field, original = value, clamped, "Input out of range, clamped");
    warnings.push(DataWarning::Clamped {
      field: field.to_string(),
      original: value,
      clamped,
    });
  }
  clamped
}

/// Clamp an integer count into `[0, max]`.
pub fn clamp_count(field: &str, value: i64, max: u32, warnings: &mut Vec<DataWarning>) -> u32 {
  let clamped = value.clamp(0, i64::from(max));
  if clamped != value {
    warn!(field, original = value, clamped, "Input out of range, clamped");
    warnings.push(DataWarning::Clamped {
      field: field.to_string(),
      original: value as f64,
      clamped: clamped as f64,
    });
  }
  u32::try_from(clamped).unwrap_or(max)
}
