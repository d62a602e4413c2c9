//! Contextual features consumed by the verdict scorer.
//!
//! Built once per analysis from boundary-validated operator input. Any
//! feature that may come from an external source is an `Option`: `None`
//! means "no data available" and the matching layer falls back to CAUTION.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Situational label for the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchContext {
    #[default]
    Neutral,
    Derby,
    /// Only one side badly needs the points.
    OneTeamDesperate,
    /// One side must win while the other is comfortable with a draw.
    MustWinImbalance,
    /// Nothing at stake for either side.
    DeadRubber,
    /// Cup tie that can go to extra time.
    CupExtraTime,
}

impl MatchContext {
    pub const ALL: [Self; 6] = [
        Self::Neutral,
        Self::Derby,
        Self::OneTeamDesperate,
        Self::MustWinImbalance,
        Self::DeadRubber,
        Self::CupExtraTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Derby => "derby",
            Self::OneTeamDesperate => "one-team-desperate",
            Self::MustWinImbalance => "must-win-imbalance",
            Self::DeadRubber => "dead-rubber",
            Self::CupExtraTime => "cup-extra-time",
        }
    }
}

impl fmt::Display for MatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown match context label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown match context '{0}' (expected one of: neutral, derby, one-team-desperate, must-win-imbalance, dead-rubber, cup-extra-time)")]
pub struct ContextParseError(pub String);

impl FromStr for MatchContext {
    type Err = ContextParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == norm)
            .ok_or_else(|| ContextParseError(s.to_string()))
    }
}

/// Immutable per-analysis feature bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualFeatures {
    /// Decimal market odds for the draw.
    pub draw_odds: f64,
    /// Gap between the two teams in the league table.
    pub table_gap: u32,
    /// Combined wins of both teams over their last five.
    pub combined_wins: u32,
    /// Combined 0-0 and 1-1 results in recent matches.
    pub draw_scorelines: u32,
    /// Draws in the last K head-to-head meetings.
    pub h2h_draws: Option<u32>,
    /// League historical draw rate, in percent.
    pub league_draw_rate: Option<f64>,
    /// Average combined goals per match.
    pub goal_density: Option<f64>,
    pub context: MatchContext,
}

impl Default for ContextualFeatures {
    fn default() -> Self {
        Self {
            draw_odds: 3.2,
            table_gap: 0,
            combined_wins: 0,
            draw_scorelines: 0,
            h2h_draws: None,
            league_draw_rate: None,
            goal_density: None,
            context: MatchContext::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_parse_variants() {
        assert_eq!("derby".parse::<MatchContext>(), Ok(MatchContext::Derby));
        assert_eq!(
            "Must_Win_Imbalance".parse::<MatchContext>(),
            Ok(MatchContext::MustWinImbalance)
        );
        assert_eq!(
            " cup extra time ".parse::<MatchContext>(),
            Ok(MatchContext::CupExtraTime)
        );
    }

    #[test]
    fn test_context_parse_unknown() {
        let err = "friendly".parse::<MatchContext>().unwrap_err();
        assert!(err.to_string().contains("friendly"));
    }

    #[test]
    fn test_context_display_round_trips() {
        for ctx in MatchContext::ALL {
            assert_eq!(ctx.to_string().parse::<MatchContext>(), Ok(ctx));
        }
    }

    #[test]
    fn test_context_serde_kebab_case() {
        let json = serde_json::to_string(&MatchContext::OneTeamDesperate).unwrap();
        assert_eq!(json, "\"one-team-desperate\"");
    }
}
