//! Fixture Files - TOML Batch Input
//!
//! A fixture file holds one `[[fixture]]` table per match:
//!
//! ```toml
//! [[fixture]]
//! home_team = "Torino"
//! away_team = "Genoa"
//! home_goals = "1,0,0,1,1"
//! away_goals = [0, 1, 0, 1, 0]
//! draw_odds = 3.05
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::usecases::intake::FixtureInput;

#[derive(Debug, Deserialize)]
struct FixtureFile {
  #[serde(default)]
  fixture: Vec<FixtureInput>,
}

/// Parse fixtures from TOML text.
pub fn parse_fixtures(content: &str) -> Result<Vec<FixtureInput>> {
  let file: FixtureFile = toml::from_str(content).context("Failed to parse fixture TOML")?;
  Ok(file.fixture)
}

/// Load fixtures from a TOML file.
pub fn load_fixtures(path: impl AsRef<Path>) -> Result<Vec<FixtureInput>> {
  let path = path.as_ref();
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read fixture file: {}", path.display()))?;
  let fixtures = parse_fixtures(&content)
    .with_context(|| format!("Invalid fixture file: {}", path.display()))?;

  info!(path = %path.display(), fixtures = fixtures.len(), "Fixtures loaded");
  Ok(fixtures)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::features::MatchContext;

  #[test]
  fn test_parse_multiple_fixtures() {
    let fixtures = parse_fixtures(
      r#"
      [[fixture]]
      home_team = "Torino"
      away_team = "Genoa"
      home_goals = "1,0,0,1,1"
      away_goals = "0,1,0,1,0"
      draw_odds = 3.05

      [[fixture]]
      home_team = "Lazio"
      away_team = "Roma"
      home_goals = [2, 1, 1]
      away_goals = [1, 1, 0]
      draw_odds = 3.3
      context = "derby"
      h2h_draws = 2
      "#,
    )
    .unwrap();
    assert_eq!(fixtures.len(), 2);
    assert_eq!(fixtures[1].context, MatchContext::Derby);
    assert_eq!(fixtures[1].h2h_draws, Some(2));
  }

  #[test]
  fn test_missing_odds_rejected() {
    let result = parse_fixtures(
      r#"
      [[fixture]]
      home_team = "A"
      away_team = "B"
      "#,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_load_nonexistent_file() {
    assert!(load_fixtures("nope/fixtures.toml").is_err());
  }
}
