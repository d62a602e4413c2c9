//! Analysis records.
//!
//! One `AnalysisRecord` per analysis call: the input snapshot, the model
//! output, the verdict, and any data-quality warnings raised on the way.
//! Records are never mutated once built.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::features::ContextualFeatures;
use super::goals::GoalRecord;
use super::poisson::DrawEstimate;
use super::scorer::{Verdict, VerdictTier};

/// Which side of the fixture a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Away => write!(f, "away"),
        }
    }
}

/// Degraded-confidence signals attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    /// Goal-history tokens that were not non-negative integers.
    RejectedGoalTokens { side: Side, tokens: Vec<String> },
    /// No usable goal history; λ defaulted to zero.
    InsufficientGoalHistory { side: Side },
    /// An input was outside its allowed range and was clamped.
    Clamped {
        field: String,
        original: f64,
        clamped: f64,
    },
    /// External lookup failed; the feature fell back to "no data".
    LookupFailed { feature: String, error: String },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RejectedGoalTokens { side, tokens } => {
                write!(f, "{side} goal history: ignored invalid tokens [{}]", tokens.join(", "))
            }
            Self::InsufficientGoalHistory { side } => {
                write!(f, "{side} goal history empty: scoring rate set to 0, goal density unscored")
            }
            Self::Clamped {
                field,
                original,
                clamped,
            } => write!(f, "{field} {original} out of range, clamped to {clamped}"),
            Self::LookupFailed { feature, error } => {
                write!(f, "{feature} lookup failed ({error}), treated as no data")
            }
        }
    }
}

/// Input snapshot stored with each record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSnapshot {
    pub home_team: String,
    pub away_team: String,
    pub home_goals: GoalRecord,
    pub away_goals: GoalRecord,
    pub features: ContextualFeatures,
}

impl FixtureSnapshot {
    pub fn title(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}

/// The immutable result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub fixture: FixtureSnapshot,
    pub estimate: DrawEstimate,
    pub verdict: Verdict,
    /// Threshold preset id, e.g. `standard-v1`.
    pub preset: String,
    /// Informational fractional-Kelly bankroll share.
    pub kelly_fraction: f64,
    pub warnings: Vec<DataWarning>,
}

impl AnalysisRecord {
    pub fn new(
        fixture: FixtureSnapshot,
        estimate: DrawEstimate,
        verdict: Verdict,
        preset: String,
        kelly_fraction: f64,
        warnings: Vec<DataWarning>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            fixture,
            estimate,
            verdict,
            preset,
            kelly_fraction,
            warnings,
        }
    }

    pub fn tier(&self) -> VerdictTier {
        self.verdict.tier
    }

    pub fn draw_probability(&self) -> f64 {
        self.estimate.full_time
    }

    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = DataWarning::RejectedGoalTokens {
            side: Side::Away,
            tokens: vec!["x".into(), "-2".into()],
        };
        assert_eq!(w.to_string(), "away goal history: ignored invalid tokens [x, -2]");

        let c = DataWarning::Clamped {
            field: "draw_odds".into(),
            original: 12.0,
            clamped: 10.0,
        };
        assert_eq!(c.to_string(), "draw_odds 12 out of range, clamped to 10");
    }

    #[test]
    fn test_warning_serde_tagged() {
        let w = DataWarning::InsufficientGoalHistory { side: Side::Home };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"kind":"insufficient_goal_history","side":"home"}"#);
    }
}
