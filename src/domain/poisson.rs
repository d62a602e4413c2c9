//! Poisson draw model.
//!
//! Treats each team's goal count as an independent Poisson variable and
//! computes P(home goals == away goals) by summing the joint mass on the
//! diagonal of the score grid, truncated at `max_goals`.
//!
//! The half-time variant is the same computation on scaled rates, minus a
//! fixed volatility penalty.

use serde::{Deserialize, Serialize};

/// Default truncation bound for the score grid.
pub const DEFAULT_MAX_GOALS: u32 = 10;

/// Fraction of the match elapsed at half-time.
pub const DEFAULT_HALFTIME_FRACTION: f64 = 0.45;

/// Penalty subtracted from the half-time draw probability.
pub const DEFAULT_HALFTIME_PENALTY: f64 = 0.05;

/// Poisson probability mass for k = 0..=max_goals.
///
/// Negative or non-finite rates are clamped to zero, which puts all the
/// mass on k = 0 (0^0 = 1).
pub fn poisson_pmf(lambda: f64, max_goals: u32) -> Vec<f64> {
    let lambda = clamp_rate(lambda);
    let mut out = Vec::with_capacity(max_goals as usize + 1);

    let mut p = (-lambda).exp();
    out.push(p);
    for k in 1..=max_goals {
        p = p * lambda / f64::from(k);
        out.push(p);
    }
    out
}

/// Probability that both teams score the same number of goals.
///
/// Sums `pmf_home(k) * pmf_away(k)` for k in 0..=max_goals. The result is
/// symmetric in its two rates and always lies in [0, 1].
pub fn draw_probability(lambda_home: f64, lambda_away: f64, max_goals: u32) -> f64 {
    let home = poisson_pmf(lambda_home, max_goals);
    let away = poisson_pmf(lambda_away, max_goals);

    let p: f64 = home.iter().zip(&away).map(|(h, a)| h * a).sum();
    p.clamp(0.0, 1.0)
}

fn clamp_rate(lambda: f64) -> f64 {
    if lambda.is_finite() { lambda.max(0.0) } else { 0.0 }
}

/// Configured full-time draw model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoissonDrawModel {
    /// Goals beyond this bound contribute nothing.
    pub max_goals: u32,
}

impl PoissonDrawModel {
    pub fn new(max_goals: u32) -> Self {
        Self {
            max_goals: max_goals.max(1),
        }
    }

    /// Full-time draw probability for the two rates.
    pub fn draw_probability(&self, lambda_home: f64, lambda_away: f64) -> f64 {
        draw_probability(lambda_home, lambda_away, self.max_goals)
    }
}

impl Default for PoissonDrawModel {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_GOALS)
    }
}

/// Half-time variant of the draw model.
///
/// Rates are scaled by `fraction` before the draw sum, and the result is
/// reduced by `volatility_penalty` (never below zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalftimeModel {
    pub fraction: f64,
    pub volatility_penalty: f64,
}

impl HalftimeModel {
    pub fn new(fraction: f64, volatility_penalty: f64) -> Self {
        Self {
            fraction,
            volatility_penalty,
        }
    }

    pub fn draw_probability(&self, lambda_home: f64, lambda_away: f64, max_goals: u32) -> f64 {
        let scaled = draw_probability(
            clamp_rate(lambda_home) * self.fraction,
            clamp_rate(lambda_away) * self.fraction,
            max_goals,
        );
        (scaled - self.volatility_penalty).max(0.0)
    }
}

impl Default for HalftimeModel {
    fn default() -> Self {
        Self::new(DEFAULT_HALFTIME_FRACTION, DEFAULT_HALFTIME_PENALTY)
    }
}

/// Output of the draw model for one fixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawEstimate {
    pub lambda_home: f64,
    pub lambda_away: f64,
    /// Full-time draw probability in [0, 1].
    pub full_time: f64,
    /// Half-time draw probability, when the half-time model is enabled.
    pub half_time: Option<f64>,
}

impl DrawEstimate {
    /// Runs the full-time model and, if given, the half-time model.
    pub fn compute(
        lambda_home: f64,
        lambda_away: f64,
        model: &PoissonDrawModel,
        halftime: Option<&HalftimeModel>,
    ) -> Self {
        Self {
            lambda_home,
            lambda_away,
            full_time: model.draw_probability(lambda_home, lambda_away),
            half_time: halftime
                .map(|ht| ht.draw_probability(lambda_home, lambda_away, model.max_goals)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_zero_rates_draw_certain() {
        let p = draw_probability(0.0, 0.0, DEFAULT_MAX_GOALS);
        assert!((p - 1.0).abs() < EPS, "Expected 1.0, got {p}");
    }

    #[test]
    fn test_pmf_zero_rate_puts_mass_on_zero() {
        let pmf = poisson_pmf(0.0, 5);
        assert_eq!(pmf.len(), 6);
        assert!((pmf[0] - 1.0).abs() < EPS);
        assert!(pmf[1..].iter().all(|p| *p == 0.0));
    }

    #[test]
    fn test_negative_rate_clamped_to_zero() {
        let a = draw_probability(-1.5, 0.0, DEFAULT_MAX_GOALS);
        assert!((a - 1.0).abs() < EPS);
        let b = draw_probability(f64::NAN, 1.0, DEFAULT_MAX_GOALS);
        assert!((b - (-1.0f64).exp()).abs() < EPS);
    }

    #[test]
    fn test_symmetry() {
        let a = draw_probability(1.7, 0.4, DEFAULT_MAX_GOALS);
        let b = draw_probability(0.4, 1.7, DEFAULT_MAX_GOALS);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_divergence_lowers_draw_probability() {
        let even = draw_probability(1.0, 1.0, DEFAULT_MAX_GOALS);
        let skewed = draw_probability(1.5, 0.5, DEFAULT_MAX_GOALS);
        let lopsided = draw_probability(2.0, 0.0, DEFAULT_MAX_GOALS);
        assert!(even > skewed, "{even} <= {skewed}");
        assert!(skewed > lopsided, "{skewed} <= {lopsided}");
    }

    #[test]
    fn test_equal_unit_rates_reference_value() {
        // e^-2 * sum_k 1/(k!)^2 for k = 0..=10
        let p = draw_probability(1.0, 1.0, DEFAULT_MAX_GOALS);
        assert!((p - 0.308_508_3).abs() < 1e-6, "got {p}");
    }

    #[test]
    fn test_close_rates_reference_value() {
        let p = draw_probability(1.2, 1.1, DEFAULT_MAX_GOALS);
        assert!((p - 0.283_2).abs() < 1e-3, "got {p}");
        assert!(p > 0.25 && p < 0.30);
    }

    #[test]
    fn test_halftime_scales_and_penalizes() {
        let ht = HalftimeModel::default();
        let expected = draw_probability(0.45, 0.45, DEFAULT_MAX_GOALS) - 0.05;
        let got = ht.draw_probability(1.0, 1.0, DEFAULT_MAX_GOALS);
        assert!((got - expected).abs() < EPS);
    }

    #[test]
    fn test_halftime_penalty_floors_at_zero() {
        let ht = HalftimeModel::new(0.45, 2.0);
        assert_eq!(ht.draw_probability(1.0, 1.0, DEFAULT_MAX_GOALS), 0.0);
    }

    #[test]
    fn test_estimate_without_halftime() {
        let model = PoissonDrawModel::default();
        let est = DrawEstimate::compute(1.0, 1.0, &model, None);
        assert!(est.half_time.is_none());
        assert!((est.full_time - model.draw_probability(1.0, 1.0)).abs() < EPS);
    }
}
