//! Layered verdict scorer.
//!
//! Runs every layer independently, sums the core layer scores, and maps the
//! sum onto a verdict tier. Informational layers are summed separately and
//! never touch the tier. No single layer can veto the tier: a REJECT only
//! costs its own point.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::features::ContextualFeatures;
use super::layers::{classify_context, LayerKind, LayerResult, LayerStatus};
use super::thresholds::LayerThresholds;

/// Final recommendation tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictTier {
    Avoid,
    Moderate,
    Strong,
}

impl VerdictTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "STRONG / PLAY",
            Self::Moderate => "MODERATE / WATCHLIST",
            Self::Avoid => "AVOID / NO BET",
        }
    }

    /// `score >= high` is STRONG, `mid <= score < high` is MODERATE,
    /// anything lower is AVOID.
    pub fn from_score(score: f64, cutoffs: &TierCutoffs) -> Self {
        if score >= cutoffs.high {
            Self::Strong
        } else if score >= cutoffs.mid {
            Self::Moderate
        } else {
            Self::Avoid
        }
    }

    /// Fixed stake recommendation for the tier.
    pub fn stake_advice(self) -> &'static str {
        match self {
            Self::Strong => "single unit",
            Self::Moderate => "half unit, max two concurrent",
            Self::Avoid => "none",
        }
    }
}

impl fmt::Display for VerdictTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score cutoffs for the tier step function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierCutoffs {
    pub high: f64,
    pub mid: f64,
}

impl TierCutoffs {
    pub fn new(high: f64, mid: f64) -> Self {
        Self { high, mid }
    }

    pub fn tier(&self, score: f64) -> VerdictTier {
        VerdictTier::from_score(score, self)
    }
}

impl Default for TierCutoffs {
    fn default() -> Self {
        Self::new(6.0, 5.0)
    }
}

/// Scorer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Core layers first, then informational layers.
    pub layers: Vec<LayerResult>,
    pub core_score: f64,
    pub informational_score: f64,
    pub tier: VerdictTier,
    pub stake_advice: String,
}

impl Verdict {
    pub fn core_layers(&self) -> impl Iterator<Item = &LayerResult> {
        self.layers.iter().filter(|l| l.is_core())
    }

    pub fn informational_layers(&self) -> impl Iterator<Item = &LayerResult> {
        self.layers.iter().filter(|l| !l.is_core())
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&LayerResult> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Highest achievable core score.
    pub fn max_core_score(&self) -> f64 {
        self.core_layers().count() as f64
    }
}

/// Stateless scorer over a fixed threshold set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictScorer {
    thresholds: LayerThresholds,
    cutoffs: TierCutoffs,
}

impl VerdictScorer {
    pub fn new(thresholds: LayerThresholds, cutoffs: TierCutoffs) -> Self {
        Self {
            thresholds,
            cutoffs,
        }
    }

    pub fn thresholds(&self) -> &LayerThresholds {
        &self.thresholds
    }

    pub fn cutoffs(&self) -> &TierCutoffs {
        &self.cutoffs
    }

    /// Score one fixture.
    ///
    /// `probability` is the model's full-time draw probability; it only
    /// feeds the informational value layer.
    pub fn evaluate(&self, features: &ContextualFeatures, probability: f64) -> Verdict {
        let layers: Vec<LayerResult> = LayerKind::CORE
            .into_iter()
            .chain(LayerKind::INFORMATIONAL)
            .map(|kind| self.evaluate_layer(kind, features, probability))
            .collect();

        let core_score: f64 = layers.iter().filter(|l| l.is_core()).map(|l| l.score).sum();
        let informational_score: f64 =
            layers.iter().filter(|l| !l.is_core()).map(|l| l.score).sum();
        let tier = self.cutoffs.tier(core_score);

        Verdict {
            layers,
            core_score,
            informational_score,
            tier,
            stake_advice: tier.stake_advice().to_string(),
        }
    }

    /// Evaluate a single layer in isolation.
    pub fn evaluate_layer(
        &self,
        kind: LayerKind,
        features: &ContextualFeatures,
        probability: f64,
    ) -> LayerResult {
        let t = &self.thresholds;
        match kind {
            LayerKind::LeagueBaseline => match features.league_draw_rate {
                Some(rate) => LayerResult::new(
                    kind,
                    t.league.classify(rate),
                    format!(
                        "league draw rate {rate:.1}% (optimal {:.0}-{:.0}%, fallback from {:.0}%)",
                        t.league.pass_min, t.league.pass_max, t.league.caution_min
                    ),
                ),
                None => LayerResult::no_data(kind),
            },
            LayerKind::GoalDensity => match features.goal_density {
                Some(g) => LayerResult::new(
                    kind,
                    t.goal_density.classify(g),
                    format!(
                        "{g:.2} goals per match (pass <= {:.2}, caution <= {:.2})",
                        t.goal_density.pass_max, t.goal_density.caution_max
                    ),
                ),
                None => LayerResult::no_data(kind),
            },
            LayerKind::ScorelineDistribution => {
                let n = features.draw_scorelines;
                LayerResult::new(
                    kind,
                    t.scorelines.classify(f64::from(n)),
                    format!(
                        "{n} x 0-0/1-1 in recent matches (pass >= {:.0}, caution >= {:.0})",
                        t.scorelines.pass_min, t.scorelines.caution_min
                    ),
                )
            }
            LayerKind::StrengthParity => {
                let gap = features.table_gap;
                LayerResult::new(
                    kind,
                    t.table_gap.classify(f64::from(gap)),
                    format!(
                        "table gap {gap} (pass <= {:.0}, caution <= {:.0})",
                        t.table_gap.pass_max, t.table_gap.caution_max
                    ),
                )
            }
            LayerKind::FormVolatility => {
                let wins = features.combined_wins;
                LayerResult::new(
                    kind,
                    t.form_wins.classify(f64::from(wins)),
                    format!(
                        "{wins} combined wins in last five (pass <= {:.0}, caution <= {:.0})",
                        t.form_wins.pass_max, t.form_wins.caution_max
                    ),
                )
            }
            LayerKind::MatchContext => {
                let ctx = features.context;
                LayerResult::new(kind, classify_context(ctx), format!("context: {ctx}"))
            }
            LayerKind::MarketSanity => {
                let odds = features.draw_odds;
                let status = t.odds.classify(odds);
                let note = match status {
                    LayerStatus::Pass => "healthy",
                    LayerStatus::Caution => "borderline",
                    LayerStatus::Reject => "suspiciously short",
                };
                LayerResult::new(
                    kind,
                    status,
                    format!(
                        "draw odds {odds:.2} {note} (healthy {:.2}-{:.2}, floor {:.2})",
                        t.odds.pass_min, t.odds.pass_max, t.odds.reject_below
                    ),
                )
            }
            LayerKind::HeadToHead => match features.h2h_draws {
                Some(d) => LayerResult::new(
                    kind,
                    t.h2h.classify(f64::from(d)),
                    format!(
                        "{d} draws in recent meetings (pass >= {:.0}, caution >= {:.0})",
                        t.h2h.pass_min, t.h2h.caution_min
                    ),
                ),
                None => LayerResult::no_data(kind),
            },
            LayerKind::ModelValue => self.value_layer(features.draw_odds, probability),
        }
    }

    fn value_layer(&self, odds: f64, probability: f64) -> LayerResult {
        let kind = LayerKind::ModelValue;
        if !(odds > 1.0 && odds.is_finite()) {
            return LayerResult::no_data(kind);
        }
        let implied = 1.0 / odds;
        let edge = probability - implied;
        let status = if edge >= 0.0 {
            LayerStatus::Pass
        } else if edge >= -self.thresholds.value_tolerance {
            LayerStatus::Caution
        } else {
            LayerStatus::Reject
        };
        LayerResult::new(
            kind,
            status,
            format!(
                "model {:.1}% vs implied {:.1}% (edge {:+.1} pts)",
                probability * 100.0,
                implied * 100.0,
                edge * 100.0
            ),
        )
    }
}

impl Default for VerdictScorer {
    fn default() -> Self {
        Self::new(LayerThresholds::standard(), TierCutoffs::default())
    }
}
