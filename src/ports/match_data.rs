//! Match Data Port - External Feature Lookup Interface
//!
//! Defines the trait for fetching features that an operator would
//! otherwise enter by hand (head-to-head draws, league draw rate).
//! The engine treats fetched values exactly like manual ones; it never
//! knows where a value came from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identifies a fixture for external lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRef {
  /// Home team display name.
  pub home_team: String,
  /// Away team display name.
  pub away_team: String,
  /// Provider match id (football-data.org match id).
  pub match_id: Option<u64>,
  /// Provider competition code (e.g. `PL`, `SA`).
  pub competition: Option<String>,
}

/// Trait for external match-data providers.
///
/// `Ok(None)` means the provider has nothing for this fixture; `Err`
/// means the lookup itself failed. Callers treat both as "no data".
#[async_trait]
pub trait MatchDataSource: Send + Sync + 'static {
  /// Draws in the last `window` meetings between the two teams.
  async fn head_to_head_draws(
    &self,
    fixture: &FixtureRef,
    window: u32,
  ) -> anyhow::Result<Option<u32>>;

  /// Historical draw rate of the fixture's league, in percent.
  async fn league_draw_rate(&self, fixture: &FixtureRef) -> anyhow::Result<Option<f64>>;

  /// Check if the provider is reachable.
  async fn is_healthy(&self) -> bool;
}

/// Source used when lookups are disabled: never has data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualOnly;

#[async_trait]
impl MatchDataSource for ManualOnly {
  async fn head_to_head_draws(
    &self,
    _fixture: &FixtureRef,
    _window: u32,
  ) -> anyhow::Result<Option<u32>> {
    Ok(None)
  }

  async fn league_draw_rate(&self, _fixture: &FixtureRef) -> anyhow::Result<Option<f64>> {
    Ok(None)
  }

  async fn is_healthy(&self) -> bool {
    true
  }
}
