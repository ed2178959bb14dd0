//! Performance metrics — pure functions over the recorded equity curve.
//!
//! Every metric is a pure function: equity curve in, scalar out. No
//! dependencies on the runner or the engine loop.

use serde::{Deserialize, Serialize};
use ticklab_core::engine::EquityPoint;

/// Aggregate performance metrics for a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_return: f64,
    pub sharpe_per_period: f64,
    pub max_drawdown: f64,
}

impl PerformanceSummary {
    /// Compute all metrics from an equity curve.
    pub fn compute(equity_curve: &[EquityPoint]) -> Self {
        let equities: Vec<f64> = equity_curve.iter().map(|point| point.equity).collect();
        Self {
            total_return: total_return(&equities),
            sharpe_per_period: sharpe_per_period(&equities),
            max_drawdown: max_drawdown(&equities),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return as a fraction: (final - initial) / initial.
pub fn total_return(equities: &[f64]) -> f64 {
    if equities.len() < 2 {
        return 0.0;
    }
    let initial = equities[0];
    let final_eq = *equities.last().unwrap();
    if initial <= 0.0 {
        return 0.0;
    }
    (final_eq - initial) / initial
}

/// Per-period (unannualized) Sharpe ratio over consecutive-tick returns.
///
/// Sharpe = mean(returns) / pstdev(returns), using the **population**
/// standard deviation. Returns 0.0 (never NaN) when the variance is zero
/// or the curve is shorter than three points.
pub fn sharpe_per_period(equities: &[f64]) -> f64 {
    let returns = tick_returns(equities);
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(&returns);
    let std = population_std_dev(&returns);
    if std < 1e-15 {
        return 0.0;
    }
    mean / std
}

/// Maximum peak-to-trough drawdown as a positive fraction in [0, 1].
///
/// `max over t of (peak_up_to_t - equity_t) / peak_up_to_t`. Returns 0.0
/// for constant or monotonically increasing curves.
pub fn max_drawdown(equities: &[f64]) -> f64 {
    if equities.len() < 2 {
        return 0.0;
    }
    let mut peak = equities[0];
    let mut max_dd = 0.0_f64;

    for &eq in equities {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (peak - eq) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Consecutive-tick percentage returns of an equity curve.
pub fn tick_returns(equities: &[f64]) -> Vec<f64> {
    if equities.len() < 2 {
        return Vec::new();
    }
    equities
        .windows(2)
        .map(|w| {
            if w[0] > 0.0 {
                (w[1] - w[0]) / w[0]
            } else {
                0.0
            }
        })
        .collect()
}

fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn curve(equities: &[f64]) -> Vec<EquityPoint> {
        let start = Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap();
        equities
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                timestamp: start + Duration::seconds(i as i64),
                equity,
            })
            .collect()
    }

    // ── Total return ──

    #[test]
    fn total_return_positive() {
        let eq = vec![100_000.0, 100_500.0, 110_000.0];
        assert!((total_return(&eq) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn total_return_negative() {
        let eq = vec![100_000.0, 95_000.0, 90_000.0];
        assert!((total_return(&eq) - (-0.1)).abs() < 1e-10);
    }

    #[test]
    fn total_return_single_point() {
        assert_eq!(total_return(&[100_000.0]), 0.0);
    }

    #[test]
    fn total_return_empty() {
        assert_eq!(total_return(&[]), 0.0);
    }

    // ── Sharpe ──

    #[test]
    fn sharpe_constant_equity_is_zero() {
        let eq = vec![100_000.0; 100];
        assert_eq!(sharpe_per_period(&eq), 0.0);
    }

    #[test]
    fn sharpe_identical_returns_is_zero_not_nan() {
        // Constant per-tick return → zero variance → 0.0 by contract.
        let mut eq = vec![100_000.0];
        for i in 1..100 {
            eq.push(eq[i - 1] * 1.001);
        }
        let s = sharpe_per_period(&eq);
        assert_eq!(s, 0.0);
        assert!(s.is_finite());
    }

    #[test]
    fn sharpe_positive_for_mostly_rising_curve() {
        let mut eq = vec![100_000.0];
        for i in 1..200 {
            let r = if i % 2 == 0 { 1.002 } else { 1.0005 };
            eq.push(eq[i - 1] * r);
        }
        assert!(sharpe_per_period(&eq) > 0.0);
    }

    #[test]
    fn sharpe_uses_population_std_dev() {
        // Returns +10% then -10%: mean = 0 exactly, so Sharpe = 0; the
        // population denominator is what keeps two-return curves defined.
        let eq = vec![100.0, 110.0, 99.0];
        let returns = tick_returns(&eq);
        assert_eq!(returns.len(), 2);
        assert!((sharpe_per_period(&eq)).abs() < 1e-10);
    }

    #[test]
    fn sharpe_short_curve_is_zero() {
        assert_eq!(sharpe_per_period(&[100_000.0]), 0.0);
        assert_eq!(sharpe_per_period(&[100_000.0, 101_000.0]), 0.0);
    }

    // ── Max drawdown ──

    #[test]
    fn max_drawdown_known() {
        let eq = vec![100_000.0, 110_000.0, 90_000.0, 95_000.0];
        // Peak = 110k, trough = 90k → dd = 20k/110k ≈ 18.18%, positive.
        let expected = (110_000.0 - 90_000.0) / 110_000.0;
        assert!((max_drawdown(&eq) - expected).abs() < 1e-10);
    }

    #[test]
    fn max_drawdown_monotonic_increase_is_zero() {
        let eq: Vec<f64> = (0..100).map(|i| 100_000.0 + i as f64 * 100.0).collect();
        assert_eq!(max_drawdown(&eq), 0.0);
    }

    #[test]
    fn max_drawdown_bounded_by_unit_interval() {
        let eq = vec![100.0, 50.0, 1.0, 120.0, 0.5];
        let dd = max_drawdown(&eq);
        assert!((0.0..=1.0).contains(&dd));
    }

    #[test]
    fn max_drawdown_empty() {
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    // ── Tick returns ──

    #[test]
    fn tick_returns_basic() {
        let eq = vec![100.0, 110.0, 104.5];
        let r = tick_returns(&eq);
        assert_eq!(r.len(), 2);
        assert!((r[0] - 0.1).abs() < 1e-10);
        assert!((r[1] - (104.5 - 110.0) / 110.0).abs() < 1e-10);
    }

    // ── Aggregate ──

    #[test]
    fn compute_all_metrics_flat_curve() {
        let summary = PerformanceSummary::compute(&curve(&[100_000.0; 50]));
        assert_eq!(summary.total_return, 0.0);
        assert_eq!(summary.sharpe_per_period, 0.0);
        assert_eq!(summary.max_drawdown, 0.0);
    }

    #[test]
    fn compute_all_metrics_finite() {
        let summary =
            PerformanceSummary::compute(&curve(&[100_000.0, 103_000.0, 99_000.0, 104_000.0]));
        assert!(summary.total_return.is_finite());
        assert!(summary.sharpe_per_period.is_finite());
        assert!((0.0..=1.0).contains(&summary.max_drawdown));
    }

    // ── Properties ──

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_equities() -> impl Strategy<Value = Vec<f64>> {
            prop::collection::vec(1.0..1_000_000.0_f64, 0..200)
        }

        proptest! {
            /// Drawdown is a fraction of the running peak, so it can never
            /// leave [0, 1] for positive equity curves.
            #[test]
            fn drawdown_in_unit_interval(equities in arb_equities()) {
                let dd = max_drawdown(&equities);
                prop_assert!((0.0..=1.0).contains(&dd));
            }

            /// Sharpe is always a finite number, never NaN or infinite.
            #[test]
            fn sharpe_is_finite(equities in arb_equities()) {
                prop_assert!(sharpe_per_period(&equities).is_finite());
            }

            /// One return per consecutive pair of equity points.
            #[test]
            fn tick_return_count(equities in arb_equities()) {
                let expected = equities.len().saturating_sub(1);
                prop_assert_eq!(tick_returns(&equities).len(), expected);
            }
        }
    }
}
