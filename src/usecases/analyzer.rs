//! Draw Analyzer - Single Fixture Analysis Pipeline
//!
//! The main use case:
//! 1. Validates operator input at the boundary (intake)
//! 2. Fills missing external features from the MatchDataSource
//! 3. Estimates λ per team and runs the Poisson draw model
//! 4. Scores the verdict layers and maps the total to a tier
//! 5. Sizes an informational Kelly stake
//! 6. Packs everything into an immutable AnalysisRecord
//!
//! Lookup failures never abort an analysis: the feature degrades to
//! "no data" and the record carries a warning.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::{AppConfig, InputLimits};
use crate::domain::analysis::{AnalysisRecord, DataWarning, FixtureSnapshot};
use crate::domain::goals::combined_goal_density;
use crate::domain::kelly::KellySizer;
use crate::domain::poisson::{DrawEstimate, HalftimeModel, PoissonDrawModel};
use crate::domain::scorer::VerdictScorer;
use crate::ports::match_data::MatchDataSource;

use super::intake::{clamp_count, clamp_f64, FixtureInput, ValidatedFixture};

/// Stateless analysis pipeline over a match-data source.
pub struct DrawAnalyzer<S: MatchDataSource> {
  /// External feature provider.
  source: Arc<S>,
  /// Full-time Poisson model.
  model: PoissonDrawModel,
  /// Optional half-time model.
  halftime: Option<HalftimeModel>,
  /// Verdict scorer with resolved thresholds.
  scorer: VerdictScorer,
  /// Informational Kelly sizer.
  sizer: KellySizer,
  /// Boundary validation ranges.
  limits: InputLimits,
  /// Preset id recorded on each analysis.
  preset_id: String,
}

impl<S: MatchDataSource> DrawAnalyzer<S> {
  /// Create an analyzer from configuration.
  pub fn new(source: Arc<S>, config: &AppConfig) -> Self {
    Self {
      source,
      model: config.model.draw_model(),
      halftime: config.model.halftime_model(),
      scorer: config.scorer(),
      sizer: KellySizer::new(config.kelly.fraction, config.kelly.max_fraction),
      limits: config.limits.clone(),
      preset_id: config.scoring.preset_id(),
    }
  }

  pub fn scorer(&self) -> &VerdictScorer {
    &self.scorer
  }

  /// Analyze one fixture end to end.
  #[instrument(skip(self, input), fields(fixture = %format!("{} vs {}", input.home_team, input.away_team)))]
  pub async fn analyze(&self, input: &FixtureInput) -> AnalysisRecord {
    let mut validated = input.validate(&self.limits);
    self.enrich(&mut validated).await;
    let record = self.evaluate(validated);

    info!(
      lambda_home = record.estimate.lambda_home,
      lambda_away = record.estimate.lambda_away,
      draw_probability = record.estimate.full_time,
      core_score = record.verdict.core_score,
      tier = ?record.verdict.tier,
      warnings = record.warnings.len(),
      "Analysis complete"
    );

    record
  }

  /// Pure engine step: model, scorer, and record assembly.
  ///
  /// Never touches the data source.
  pub fn evaluate(&self, validated: ValidatedFixture) -> AnalysisRecord {
    let ValidatedFixture {
      fixture,
      home_goals,
      away_goals,
      mut features,
      warnings,
    } = validated;

    let lambda_home = home_goals.lambda();
    let lambda_away = away_goals.lambda();
    let estimate =
      DrawEstimate::compute(lambda_home, lambda_away, &self.model, self.halftime.as_ref());

    // Empty histories mean "no data", not a genuinely low-scoring side.
    if features.goal_density.is_none() {
      features.goal_density = combined_goal_density(&home_goals, &away_goals);
    }

    let verdict = self.scorer.evaluate(&features, estimate.full_time);
    let kelly_fraction = self
      .sizer
      .optimal_fraction(estimate.full_time, features.draw_odds);

    debug!(
      core = verdict.core_score,
      informational = verdict.informational_score,
      kelly = kelly_fraction,
      "Verdict scored"
    );

    AnalysisRecord::new(
      FixtureSnapshot {
        home_team: fixture.home_team,
        away_team: fixture.away_team,
        home_goals,
        away_goals,
        features,
      },
      estimate,
      verdict,
      self.preset_id.clone(),
      kelly_fraction,
      warnings,
    )
  }

  /// Fill externally sourceable features the operator left empty.
  ///
  /// Manual values always win. Fetched values go through the same range
  /// clamping as manual ones.
  async fn enrich(&self, validated: &mut ValidatedFixture) {
    let window = self.limits.h2h_window;

    if validated.features.h2h_draws.is_none() {
      match self
        .source
        .head_to_head_draws(&validated.fixture, window)
        .await
      {
        Ok(Some(draws)) => {
          validated.features.h2h_draws = Some(clamp_count(
            "h2h_draws",
            i64::from(draws),
            window,
            &mut validated.warnings,
          ));
        }
        Ok(None) => debug!("No head-to-head data available"),
        Err(e) => {
          warn!(error = %e, "Head-to-head lookup failed, treating as no data");
          validated.warnings.push(DataWarning::LookupFailed {
            feature: "h2h_draws".to_string(),
            error: format!("{e:#}"),
          });
        }
      }
    }

    if validated.features.league_draw_rate.is_none() {
      match self.source.league_draw_rate(&validated.fixture).await {
        Ok(Some(rate)) => {
          validated.features.league_draw_rate = Some(clamp_f64(
            "league_draw_rate",
            rate,
            0.0,
            100.0,
            &mut validated.warnings,
          ));
        }
        Ok(None) => debug!("No league draw rate available"),
        Err(e) => {
          warn!(error = %e, "League draw rate lookup failed, treating as no data");
          validated.warnings.push(DataWarning::LookupFailed {
            feature: "league_draw_rate".to_string(),
            error: format!("{e:#}"),
          });
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::features::MatchContext;
  use crate::domain::layers::{LayerKind, LayerStatus};
  use crate::domain::scorer::VerdictTier;
  use crate::ports::match_data::ManualOnly;
  use crate::usecases::intake::GoalHistoryInput;

  fn analyzer() -> DrawAnalyzer<ManualOnly> {
    DrawAnalyzer::new(Arc::new(ManualOnly), &AppConfig::default())
  }

  fn input() -> FixtureInput {
    FixtureInput {
      home_team: "Home".into(),
      away_team: "Away".into(),
      home_goals: GoalHistoryInput::Text("1,1,0,2,1".into()),
      away_goals: GoalHistoryInput::Text("0,1,1,1,2".into()),
      draw_odds: 3.1,
      table_gap: 2,
      combined_wins: 3,
      draw_scorelines: 3,
      h2h_draws: Some(1),
      league_draw_rate: None,
      goal_density: None,
      context: MatchContext::Neutral,
      match_id: None,
      competition: None,
    }
  }

  #[tokio::test]
  async fn test_reference_fixture() {
    let record = analyzer().analyze(&input()).await;
    assert_eq!(record.estimate.lambda_home, 1.0);
    assert_eq!(record.estimate.lambda_away, 1.0);
    assert!((record.estimate.full_time - 0.308_508_3).abs() < 1e-6);
    assert_eq!(record.fixture.features.goal_density, Some(2.0));
    let density = record.verdict.layer(LayerKind::GoalDensity).unwrap();
    assert_eq!(density.status, LayerStatus::Reject);
    assert_eq!(record.verdict.core_score, 5.0);
    assert_eq!(record.tier(), VerdictTier::Moderate);
    assert_eq!(record.preset, "standard-v1");
  }

  fn density_status(home: &str, away: &str) -> (Option<f64>, LayerStatus) {
    let mut fixture = input();
    fixture.home_goals = GoalHistoryInput::Text(home.into());
    fixture.away_goals = GoalHistoryInput::Text(away.into());
    let record = analyzer().evaluate(fixture.validate(&InputLimits::default()));
    let status = record.verdict.layer(LayerKind::GoalDensity).unwrap().status;
    (record.fixture.features.goal_density, status)
  }

  #[test]
  fn test_density_on_pass_bound_passes() {
    // 0.1 + 1.05 sums to just above 1.15 in floating point.
    let away = format!("2{}", ",1".repeat(19));
    let (density, status) = density_status("1,0,0,0,0,0,0,0,0,0", &away);
    assert_eq!(density, Some(1.15));
    assert_eq!(status, LayerStatus::Pass);
  }

  #[test]
  fn test_density_bounds_from_history() {
    let cases = [
      ("1,0", "0,1", 1.0, LayerStatus::Pass),
      ("1,1,1,1", "0,0,1,0", 1.25, LayerStatus::Caution),
      ("1,1,1,1,1,1,1,1,1,1", "0,1,0,1,0,0,0,1,0,0", 1.3, LayerStatus::Caution),
      ("1,1,1,1,1,1,1,1,1,1", "1,1,0,0,0,0,0,1,0,0,1,1,0,0,0,0,0,1,0,1", 1.35, LayerStatus::Caution),
      ("2,1,1,1", "1,0,0,0", 1.5, LayerStatus::Reject),
    ];
    for (home, away, expected, status) in cases {
      assert_eq!(density_status(home, away), (Some(expected), status), "{home} / {away}");
    }
  }

  #[tokio::test]
  async fn test_empty_history_leaves_goal_density_unscored() {
    let mut fixture = input();
    fixture.away_goals = GoalHistoryInput::Text(String::new());
    let record = analyzer().analyze(&fixture).await;
    assert_eq!(record.estimate.lambda_away, 0.0);
    assert_eq!(record.fixture.features.goal_density, None);
    let density = record.verdict.layer(LayerKind::GoalDensity).unwrap();
    assert_eq!(density.status, LayerStatus::Caution);
    assert!(record.is_degraded());
  }

  #[test]
  fn test_density_override_wins() {
    let mut fixture = input();
    fixture.goal_density = Some(1.6);
    let a = analyzer();
    let record = a.evaluate(fixture.validate(&InputLimits::default()));
    let density = record.verdict.layer(LayerKind::GoalDensity).unwrap();
    assert_eq!(density.status, LayerStatus::Reject);
  }
}
