//! football-data.org API Response Types
//!
//! Only the fields the lookups need. Both `/v4/matches/{id}/head2head`
//! and `/v4/competitions/{code}/matches` return a `matches` array.

use serde::Deserialize;

/// Response body carrying a list of matches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchList {
  #[serde(default)]
  pub matches: Vec<ApiMatch>,
}

/// One match.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMatch {
  /// "FINISHED", "SCHEDULED", ...
  #[serde(default)]
  pub status: String,
  #[serde(default)]
  pub score: ApiScore,
}

impl ApiMatch {
  pub fn is_finished(&self) -> bool {
    self.status == "FINISHED"
  }

  pub fn is_draw(&self) -> bool {
    self.score.winner == Some(Winner::Draw)
  }
}

/// Score block of a match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiScore {
  /// Null until the match is decided.
  pub winner: Option<Winner>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
  HomeTeam,
  AwayTeam,
  Draw,
}

impl MatchList {
  /// Draws among the finished matches, or `None` if none finished.
  pub fn finished_draws(&self) -> Option<u32> {
    let mut finished = 0u32;
    let mut draws = 0u32;
    for m in self.matches.iter().filter(|m| m.is_finished()) {
      finished += 1;
      if m.is_draw() {
        draws += 1;
      }
    }
    (finished > 0).then_some(draws)
  }

  /// Percentage of finished matches that were drawn.
  pub fn draw_rate_pct(&self) -> Option<f64> {
    let finished = self.matches.iter().filter(|m| m.is_finished()).count();
    if finished == 0 {
      return None;
    }
    let draws = self
      .matches
      .iter()
      .filter(|m| m.is_finished() && m.is_draw())
      .count();
    Some(draws as f64 / finished as f64 * 100.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const BODY: &str = r#"{
    "aggregates": { "numberOfMatches": 4 },
    "matches": [
      { "status": "FINISHED", "score": { "winner": "DRAW", "duration": "REGULAR" } },
      { "status": "FINISHED", "score": { "winner": "HOME_TEAM" } },
      { "status": "FINISHED", "score": { "winner": "DRAW" } },
      { "status": "SCHEDULED", "score": { "winner": null } }
    ]
  }"#;

  #[test]
  fn test_counts_only_finished_draws() {
    let list: MatchList = serde_json::from_str(BODY).unwrap();
    assert_eq!(list.matches.len(), 4);
    assert_eq!(list.finished_draws(), Some(2));
  }

  #[test]
  fn test_draw_rate() {
    let list: MatchList = serde_json::from_str(BODY).unwrap();
    let rate = list.draw_rate_pct().unwrap();
    assert!((rate - 200.0 / 3.0).abs() < 1e-9);
  }

  #[test]
  fn test_no_finished_matches_is_no_data() {
    let list: MatchList = serde_json::from_str(r#"{ "matches": [] }"#).unwrap();
    assert_eq!(list.finished_draws(), None);
    assert_eq!(list.draw_rate_pct(), None);
  }
}
