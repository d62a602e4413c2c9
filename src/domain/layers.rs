//! Verdict layers.
//!
//! Every layer is a stateless three-way classifier over one feature. The
//! threshold rules below split their feature's domain into exactly three
//! zones; boundaries are always inclusive on the PASS side.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::features::MatchContext;

/// Outcome of a single layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LayerStatus {
    Pass,
    Caution,
    Reject,
}

impl LayerStatus {
    pub fn score(self) -> f64 {
        match self {
            Self::Pass => 1.0,
            Self::Caution => 0.5,
            Self::Reject => 0.0,
        }
    }
}

impl fmt::Display for LayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Caution => write!(f, "CAUTION"),
            Self::Reject => write!(f, "REJECT"),
        }
    }
}

/// The layers the scorer knows about, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    LeagueBaseline,
    GoalDensity,
    ScorelineDistribution,
    StrengthParity,
    FormVolatility,
    MatchContext,
    MarketSanity,
    HeadToHead,
    ModelValue,
}

impl LayerKind {
    /// Layers that count towards the tier.
    pub const CORE: [Self; 7] = [
        Self::LeagueBaseline,
        Self::GoalDensity,
        Self::ScorelineDistribution,
        Self::StrengthParity,
        Self::FormVolatility,
        Self::MatchContext,
        Self::MarketSanity,
    ];

    /// Layers reported alongside the core score but never used for the tier.
    pub const INFORMATIONAL: [Self; 2] = [Self::HeadToHead, Self::ModelValue];

    pub fn is_core(self) -> bool {
        !matches!(self, Self::HeadToHead | Self::ModelValue)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::LeagueBaseline => "League Baseline",
            Self::GoalDensity => "Goal Density",
            Self::ScorelineDistribution => "Scoreline Distribution",
            Self::StrengthParity => "Strength Parity",
            Self::FormVolatility => "Form Volatility",
            Self::MatchContext => "Match Context",
            Self::MarketSanity => "Market Sanity",
            Self::HeadToHead => "Head-to-Head",
            Self::ModelValue => "Model Value",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower is better: `v <= pass_max` passes, `v <= caution_max` cautions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtMost {
    pub pass_max: f64,
    pub caution_max: f64,
}

impl AtMost {
    pub fn classify(&self, v: f64) -> LayerStatus {
        if v <= self.pass_max {
            LayerStatus::Pass
        } else if v <= self.caution_max {
            LayerStatus::Caution
        } else {
            LayerStatus::Reject
        }
    }
}

/// Higher is better: `v >= pass_min` passes, `v >= caution_min` cautions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtLeast {
    pub pass_min: f64,
    pub caution_min: f64,
}

impl AtLeast {
    pub fn classify(&self, v: f64) -> LayerStatus {
        if v >= self.pass_min {
            LayerStatus::Pass
        } else if v >= self.caution_min {
            LayerStatus::Caution
        } else {
            LayerStatus::Reject
        }
    }
}

/// Optimal band `[pass_min, pass_max]` with a caution band
/// `[caution_min, pass_min)` directly below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub pass_min: f64,
    pub pass_max: f64,
    pub caution_min: f64,
}

impl Band {
    pub fn classify(&self, v: f64) -> LayerStatus {
        if v >= self.pass_min && v <= self.pass_max {
            LayerStatus::Pass
        } else if v >= self.caution_min && v < self.pass_min {
            LayerStatus::Caution
        } else {
            LayerStatus::Reject
        }
    }
}

/// Healthy odds band `[pass_min, pass_max]`; anything under `reject_below`
/// is suspicious and rejected, everything else is borderline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsBand {
    pub pass_min: f64,
    pub pass_max: f64,
    pub reject_below: f64,
}

impl OddsBand {
    pub fn classify(&self, odds: f64) -> LayerStatus {
        if odds < self.reject_below {
            LayerStatus::Reject
        } else if odds >= self.pass_min && odds <= self.pass_max {
            LayerStatus::Pass
        } else {
            LayerStatus::Caution
        }
    }
}

/// Fixed categorical mapping for the match-context layer.
pub fn classify_context(context: MatchContext) -> LayerStatus {
    match context {
        MatchContext::Neutral | MatchContext::Derby | MatchContext::DeadRubber => {
            LayerStatus::Pass
        }
        MatchContext::OneTeamDesperate | MatchContext::CupExtraTime => LayerStatus::Caution,
        MatchContext::MustWinImbalance => LayerStatus::Reject,
    }
}

/// Result of evaluating one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerResult {
    pub kind: LayerKind,
    pub status: LayerStatus,
    pub score: f64,
    pub explanation: String,
}

impl LayerResult {
    pub fn new(kind: LayerKind, status: LayerStatus, explanation: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            score: status.score(),
            explanation: explanation.into(),
        }
    }

    /// CAUTION result for a feature nobody could supply.
    pub fn no_data(kind: LayerKind) -> Self {
        Self::new(
            kind,
            LayerStatus::Caution,
            "no data available, treated as neutral",
        )
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_core(&self) -> bool {
        self.kind.is_core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_scores() {
        assert_eq!(LayerStatus::Pass.score(), 1.0);
        assert_eq!(LayerStatus::Caution.score(), 0.5);
        assert_eq!(LayerStatus::Reject.score(), 0.0);
    }

    #[test]
    fn test_at_most_boundaries_inclusive_on_pass_side() {
        let rule = AtMost {
            pass_max: 3.0,
            caution_max: 6.0,
        };
        assert_eq!(rule.classify(3.0), LayerStatus::Pass);
        assert_eq!(rule.classify(4.0), LayerStatus::Caution);
        assert_eq!(rule.classify(6.0), LayerStatus::Caution);
        assert_eq!(rule.classify(7.0), LayerStatus::Reject);
    }

    #[test]
    fn test_at_least_boundaries_inclusive_on_pass_side() {
        let rule = AtLeast {
            pass_min: 4.0,
            caution_min: 3.0,
        };
        assert_eq!(rule.classify(4.0), LayerStatus::Pass);
        assert_eq!(rule.classify(3.0), LayerStatus::Caution);
        assert_eq!(rule.classify(2.0), LayerStatus::Reject);
    }

    #[test]
    fn test_band_zones() {
        let rule = Band {
            pass_min: 26.0,
            pass_max: 32.0,
            caution_min: 23.0,
        };
        assert_eq!(rule.classify(26.0), LayerStatus::Pass);
        assert_eq!(rule.classify(32.0), LayerStatus::Pass);
        assert_eq!(rule.classify(25.0), LayerStatus::Caution);
        assert_eq!(rule.classify(23.0), LayerStatus::Caution);
        assert_eq!(rule.classify(22.9), LayerStatus::Reject);
        assert_eq!(rule.classify(32.1), LayerStatus::Reject);
    }

    #[test]
    fn test_odds_band_floor_rejects_regardless() {
        let rule = OddsBand {
            pass_min: 2.8,
            pass_max: 3.6,
            reject_below: 2.5,
        };
        assert_eq!(rule.classify(2.4), LayerStatus::Reject);
        assert_eq!(rule.classify(2.5), LayerStatus::Caution);
        assert_eq!(rule.classify(2.8), LayerStatus::Pass);
        assert_eq!(rule.classify(3.6), LayerStatus::Pass);
        assert_eq!(rule.classify(4.2), LayerStatus::Caution);
    }

    #[test]
    fn test_context_mapping() {
        assert_eq!(classify_context(MatchContext::Derby), LayerStatus::Pass);
        assert_eq!(classify_context(MatchContext::DeadRubber), LayerStatus::Pass);
        assert_eq!(classify_context(MatchContext::CupExtraTime), LayerStatus::Caution);
        assert_eq!(
            classify_context(MatchContext::MustWinImbalance),
            LayerStatus::Reject
        );
    }

    #[test]
    fn test_core_and_informational_are_disjoint() {
        assert!(LayerKind::CORE.iter().all(|k| k.is_core()));
        assert!(LayerKind::INFORMATIONAL.iter().all(|k| !k.is_core()));
    }

    #[test]
    fn test_no_data_is_caution() {
        let r = LayerResult::no_data(LayerKind::HeadToHead);
        assert_eq!(r.status, LayerStatus::Caution);
        assert_eq!(r.score, 0.5);
    }
}
