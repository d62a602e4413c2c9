//! Goal records and scoring-rate estimation.
//!
//! A goal record is the goals one team scored in its most recent matches,
//! oldest first. Operator input arrives as comma-separated text; tokens
//! that are not non-negative integers are filtered out and kept aside so
//! the caller can report them.

use serde::{Deserialize, Serialize};

/// Arithmetic mean of a goal sequence, or 0.0 when it is empty.
pub fn estimate_lambda(goals: &[u32]) -> f64 {
    if goals.is_empty() {
        return 0.0;
    }
    let total: u64 = goals.iter().map(|g| u64::from(*g)).sum();
    total as f64 / goals.len() as f64
}

/// Derived rates are rounded to nine decimals.
const RATE_PRECISION: f64 = 1e9;

/// Average combined goals per match across both teams: λ_home + λ_away.
///
/// Computed from the integer totals with a single division, then snapped
/// to nine decimals. `None` when either record is empty.
pub fn combined_goal_density(home: &GoalRecord, away: &GoalRecord) -> Option<f64> {
    if home.is_empty() || away.is_empty() {
        return None;
    }
    let (nh, na) = (home.len() as u64, away.len() as u64);
    let numerator = home.total() * na + away.total() * nh;
    let density = numerator as f64 / (nh * na) as f64;
    Some((density * RATE_PRECISION).round() / RATE_PRECISION)
}

/// Goals scored by one team in its recent matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    goals: Vec<u32>,
    /// Tokens dropped while parsing, in input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<String>,
}

impl GoalRecord {
    pub fn new(goals: Vec<u32>) -> Self {
        Self {
            goals,
            rejected: Vec::new(),
        }
    }

    /// Parse comma-separated goal counts.
    ///
    /// Whitespace around tokens and empty tokens are ignored. Anything that
    /// does not parse as a non-negative integer lands in `rejected()`.
    pub fn parse(text: &str) -> Self {
        let mut goals = Vec::new();
        let mut rejected = Vec::new();

        for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<u32>() {
                Ok(g) => goals.push(g),
                Err(_) => rejected.push(token.to_string()),
            }
        }

        Self { goals, rejected }
    }

    pub fn goals(&self) -> &[u32] {
        &self.goals
    }

    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// No usable matches: the "no data" state.
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Goals across all usable matches.
    pub fn total(&self) -> u64 {
        self.goals.iter().map(|g| u64::from(*g)).sum()
    }

    /// Scoring-rate estimate (λ) for this record.
    pub fn lambda(&self) -> f64 {
        estimate_lambda(&self.goals)
    }
}

impl From<Vec<u32>> for GoalRecord {
    fn from(goals: Vec<u32>) -> Self {
        Self::new(goals)
    }
}
