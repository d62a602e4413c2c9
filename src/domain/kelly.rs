//! Kelly Criterion stake sizing for decimal draw odds.
//!
//! Informational only: the tier's fixed stake advice is the recommendation,
//! this is the bankroll fraction the model's edge would justify. We use
//! quarter-Kelly by default with a hard cap per fixture.
//!
//! Exposes both `KellyCriterion` (Decimal API) and `KellySizer` (f64 API).

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Kelly Criterion calculator for decimal odds (Decimal API).
#[derive(Debug, Clone)]
pub struct KellyCriterion {
    /// Kelly fraction multiplier (0.25 = quarter-Kelly)
    fraction: Decimal,
    /// Maximum stake as fraction of bankroll
    max_fraction: Decimal,
}

impl KellyCriterion {
    pub fn new(fraction: Decimal, max_fraction: Decimal) -> Self {
        Self {
            fraction,
            max_fraction,
        }
    }

    /// Fractional Kelly stake for a bet at decimal `odds`.
    ///
    /// Kelly formula with net odds b = odds - 1:
    ///   f* = (p * b - q) / b
    /// where p is the model probability and q = 1 - p.
    pub fn optimal_fraction(&self, probability: Decimal, odds: Decimal) -> Decimal {
        if odds <= Decimal::ONE || probability <= Decimal::ZERO || probability >= Decimal::ONE {
            return Decimal::ZERO;
        }

        let b = odds - Decimal::ONE;
        let q = Decimal::ONE - probability;
        let full_kelly = (probability * b - q) / b;

        if full_kelly <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        (full_kelly * self.fraction).min(self.max_fraction)
    }
}

impl Default for KellyCriterion {
    /// Default: quarter-Kelly with a 5% cap.
    fn default() -> Self {
        Self {
            fraction: dec!(0.25),
            max_fraction: dec!(0.05),
        }
    }
}

// ────────────────────────────────────────────
// KellySizer - f64 boundary API for usecases
// ────────────────────────────────────────────

/// f64 wrapper around `KellyCriterion` so usecases never import `Decimal`.
#[derive(Debug, Clone, Default)]
pub struct KellySizer {
    inner: KellyCriterion,
}

impl KellySizer {
    /// Create a sizer with the given Kelly fraction and stake cap.
    pub fn new(fraction: f64, max_fraction: f64) -> Self {
        let frac = Decimal::from_f64(fraction).unwrap_or(dec!(0.25));
        let cap = Decimal::from_f64(max_fraction).unwrap_or(dec!(0.05));
        Self {
            inner: KellyCriterion::new(frac, cap),
        }
    }

    /// Bankroll fraction (0.0 – cap), rounded to four places.
    pub fn optimal_fraction(&self, probability: f64, odds: f64) -> f64 {
        let (Some(prob), Some(odds)) = (Decimal::from_f64(probability), Decimal::from_f64(odds))
        else {
            return 0.0;
        };

        self.inner
            .optimal_fraction(prob, odds)
            .round_dp(4)
            .to_f64()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kelly_positive_edge() {
        let k = KellyCriterion::new(dec!(1.0), dec!(1.0));
        // p = 0.40 at 3.0: b = 2, f* = (0.8 - 0.6) / 2 = 0.10
        assert_eq!(k.optimal_fraction(dec!(0.40), dec!(3.0)), dec!(0.10));
    }

    #[test]
    fn test_kelly_no_edge_is_zero() {
        let k = KellyCriterion::default();
        assert_eq!(k.optimal_fraction(dec!(0.30), dec!(3.0)), Decimal::ZERO);
        assert_eq!(k.optimal_fraction(dec!(0.3333), dec!(3.0)), Decimal::ZERO);
    }

    #[test]
    fn test_kelly_fractional_and_capped() {
        let quarter = KellyCriterion::new(dec!(0.25), dec!(1.0));
        assert_eq!(quarter.optimal_fraction(dec!(0.40), dec!(3.0)), dec!(0.025));

        let capped = KellyCriterion::new(dec!(1.0), dec!(0.05));
        assert_eq!(capped.optimal_fraction(dec!(0.40), dec!(3.0)), dec!(0.05));
    }

    #[test]
    fn test_kelly_rejects_degenerate_odds() {
        let k = KellyCriterion::default();
        assert_eq!(k.optimal_fraction(dec!(0.9), dec!(1.0)), Decimal::ZERO);
        assert_eq!(k.optimal_fraction(dec!(1.0), dec!(3.0)), Decimal::ZERO);
    }

    #[test]
    fn test_sizer_f64_boundary() {
        let sizer = KellySizer::new(0.25, 0.05);
        let f = sizer.optimal_fraction(0.40, 3.0);
        assert!((f - 0.025).abs() < 1e-9, "got {f}");
        assert_eq!(sizer.optimal_fraction(f64::NAN, 3.0), 0.0);
    }
}
