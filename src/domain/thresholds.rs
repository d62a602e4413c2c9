//! Named, versioned threshold presets for the verdict layers.
//!
//! The thresholds are operator heuristics. Presets keep one canonical set
//! of values per name; configuration can override individual scalars on
//! top of a preset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layers::{AtLeast, AtMost, Band, OddsBand};

/// Built-in threshold presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPreset {
    #[default]
    Standard,
    /// Tighter market band and goal density cutoffs.
    Strict,
}

impl ThresholdPreset {
    pub const ALL: [Self; 2] = [Self::Standard, Self::Strict];

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Strict => "strict",
        }
    }

    /// Bumped whenever a preset's values change.
    pub fn version(self) -> u32 {
        1
    }

    /// `name-vN`, recorded on every analysis.
    pub fn id(self) -> String {
        format!("{}-v{}", self.name(), self.version())
    }

    pub fn thresholds(self) -> LayerThresholds {
        match self {
            Self::Standard => LayerThresholds::standard(),
            Self::Strict => LayerThresholds::strict(),
        }
    }
}

impl fmt::Display for ThresholdPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown threshold preset '{0}' (expected standard or strict)")]
pub struct PresetParseError(pub String);

impl FromStr for ThresholdPreset {
    type Err = PresetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == norm)
            .ok_or_else(|| PresetParseError(s.to_string()))
    }
}

/// Every threshold the scorer uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerThresholds {
    /// League historical draw rate, percent.
    pub league: Band,
    /// Average combined goals per match.
    pub goal_density: AtMost,
    /// 0-0 and 1-1 results in the last ten.
    pub scorelines: AtLeast,
    /// League table position gap.
    pub table_gap: AtMost,
    /// Combined wins in the last five.
    pub form_wins: AtMost,
    /// Draws in the last K meetings.
    pub h2h: AtLeast,
    pub odds: OddsBand,
    /// How far the model probability may sit under the implied
    /// probability before the value layer rejects.
    pub value_tolerance: f64,
}

impl LayerThresholds {
    pub fn standard() -> Self {
        Self {
            league: Band {
                pass_min: 26.0,
                pass_max: 32.0,
                caution_min: 23.0,
            },
            goal_density: AtMost {
                pass_max: 1.15,
                caution_max: 1.35,
            },
            scorelines: AtLeast {
                pass_min: 4.0,
                caution_min: 3.0,
            },
            table_gap: AtMost {
                pass_max: 3.0,
                caution_max: 6.0,
            },
            form_wins: AtMost {
                pass_max: 4.0,
                caution_max: 5.0,
            },
            h2h: AtLeast {
                pass_min: 2.0,
                caution_min: 1.0,
            },
            odds: OddsBand {
                pass_min: 2.8,
                pass_max: 3.6,
                reject_below: 2.5,
            },
            value_tolerance: 0.03,
        }
    }

    pub fn strict() -> Self {
        Self {
            goal_density: AtMost {
                pass_max: 1.10,
                caution_max: 1.30,
            },
            odds: OddsBand {
                pass_min: 2.8,
                pass_max: 3.3,
                reject_below: 2.5,
            },
            ..Self::standard()
        }
    }

    /// Threshold pairs out of order, if any.
    pub fn ordering_errors(&self) -> Vec<String> {
        let mut errs = Vec::new();
        let mut check = |ok: bool, msg: &str| {
            if !ok {
                errs.push(msg.to_string());
            }
        };
        check(
            self.league.caution_min <= self.league.pass_min
                && self.league.pass_min <= self.league.pass_max,
            "league: require caution_min <= pass_min <= pass_max",
        );
        check(
            self.goal_density.pass_max <= self.goal_density.caution_max,
            "goal_density: require pass_max <= caution_max",
        );
        check(
            self.scorelines.caution_min <= self.scorelines.pass_min,
            "scorelines: require caution_min <= pass_min",
        );
        check(
            self.table_gap.pass_max <= self.table_gap.caution_max,
            "table_gap: require pass_max <= caution_max",
        );
        check(
            self.form_wins.pass_max <= self.form_wins.caution_max,
            "form_wins: require pass_max <= caution_max",
        );
        check(
            self.h2h.caution_min <= self.h2h.pass_min,
            "h2h: require caution_min <= pass_min",
        );
        check(
            self.odds.reject_below <= self.odds.pass_min
                && self.odds.pass_min <= self.odds.pass_max,
            "odds: require reject_below <= pass_min <= pass_max",
        );
        check(self.value_tolerance >= 0.0, "value_tolerance must be >= 0");
        errs
    }
}

impl Default for LayerThresholds {
    fn default() -> Self {
        Self::standard()
    }
}

/// Flat scalar overrides applied on top of a preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdOverrides {
    pub league_pass_min: Option<f64>,
    pub league_pass_max: Option<f64>,
    pub league_caution_min: Option<f64>,
    pub goal_density_pass_max: Option<f64>,
    pub goal_density_caution_max: Option<f64>,
    pub scorelines_pass_min: Option<u32>,
    pub scorelines_caution_min: Option<u32>,
    pub table_gap_pass_max: Option<u32>,
    pub table_gap_caution_max: Option<u32>,
    pub form_wins_pass_max: Option<u32>,
    pub form_wins_caution_max: Option<u32>,
    pub h2h_pass_min: Option<u32>,
    pub h2h_caution_min: Option<u32>,
    pub odds_pass_min: Option<f64>,
    pub odds_pass_max: Option<f64>,
    pub odds_reject_below: Option<f64>,
    pub value_tolerance: Option<f64>,
}

impl ThresholdOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, base: LayerThresholds) -> LayerThresholds {
        fn set(slot: &mut f64, v: Option<f64>) {
            if let Some(v) = v {
                *slot = v;
            }
        }
        fn set_count(slot: &mut f64, v: Option<u32>) {
            if let Some(v) = v {
                *slot = f64::from(v);
            }
        }

        let mut t = base;
        set(&mut t.league.pass_min, self.league_pass_min);
        set(&mut t.league.pass_max, self.league_pass_max);
        set(&mut t.league.caution_min, self.league_caution_min);
        set(&mut t.goal_density.pass_max, self.goal_density_pass_max);
        set(&mut t.goal_density.caution_max, self.goal_density_caution_max);
        set_count(&mut t.scorelines.pass_min, self.scorelines_pass_min);
        set_count(&mut t.scorelines.caution_min, self.scorelines_caution_min);
        set_count(&mut t.table_gap.pass_max, self.table_gap_pass_max);
        set_count(&mut t.table_gap.caution_max, self.table_gap_caution_max);
        set_count(&mut t.form_wins.pass_max, self.form_wins_pass_max);
        set_count(&mut t.form_wins.caution_max, self.form_wins_caution_max);
        set_count(&mut t.h2h.pass_min, self.h2h_pass_min);
        set_count(&mut t.h2h.caution_min, self.h2h_caution_min);
        set(&mut t.odds.pass_min, self.odds_pass_min);
        set(&mut t.odds.pass_max, self.odds_pass_max);
        set(&mut t.odds.reject_below, self.odds_reject_below);
        set(&mut t.value_tolerance, self.value_tolerance);
        t
    }
}
