//! Integration tests for the runner: full engine runs over synthetic data.
//!
//! Exercises the end-to-end contract: curve length, determinism, boundary
//! fail probabilities, reject-ratio convergence, and crossover intent
//! counts on short series.

use chrono::{Duration, TimeZone, Utc};
use ticklab_core::domain::{MarketObservation, PriceSeries};
use ticklab_runner::config::{RunConfig, StrategyConfig};
use ticklab_runner::metrics;
use ticklab_runner::runner::{run_combined, run_separate};
use ticklab_runner::synthetic::{random_walk, WalkParams};

fn walk(ticks: usize, seed: u64) -> PriceSeries {
    random_walk(&WalkParams {
        ticks,
        seed,
        ..WalkParams::default()
    })
    .unwrap()
}

fn constant_series(ticks: usize, price: f64) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap();
    PriceSeries::new(
        (0..ticks)
            .map(|i| MarketObservation {
                timestamp: start + Duration::seconds(i as i64),
                symbol: "AAPL".into(),
                price,
            })
            .collect(),
    )
    .unwrap()
}

fn crossover_only(fail_probability: f64) -> RunConfig {
    RunConfig {
        fail_probability,
        strategies: vec![StrategyConfig::MaCrossover {
            fast: 5,
            slow: 20,
            quantity: 10,
        }],
        ..RunConfig::default()
    }
}

fn momentum_scalper(fail_probability: f64) -> RunConfig {
    RunConfig {
        fail_probability,
        strategies: vec![StrategyConfig::Momentum {
            lookback: 1,
            threshold: 0.0,
            quantity: 5,
        }],
        ..RunConfig::default()
    }
}

// ── Curve shape ──────────────────────────────────────────────────────

#[test]
fn equity_curve_spans_every_observation() {
    for ticks in [1, 7, 50, 333] {
        let series = walk(ticks, 42);
        let outcome = run_combined(&RunConfig::default(), &series).unwrap();
        assert_eq!(outcome.result.equity_curve.len(), ticks);
    }
}

// ── Crossover intent count ───────────────────────────────────────────

#[test]
fn fifty_ticks_fit_at_most_one_full_cross() {
    // 50 observations, fast = 5, slow = 20: the first eligible tick is
    // index 20, which leaves room for one full up-down round trip. A
    // flat-rise-fall series exercises exactly that: one golden cross on
    // the way up, one death cross on the way down, two intents total.
    let start = Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap();
    let mut prices = vec![100.0; 25];
    prices.extend((1..=15).map(|i| 100.0 + f64::from(i))); // ramp to 115
    prices.extend((1..=10).map(|i| 115.0 - 2.0 * f64::from(i))); // fall to 95
    assert_eq!(prices.len(), 50);

    let series = PriceSeries::new(
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| MarketObservation {
                timestamp: start + Duration::seconds(i as i64),
                symbol: "AAPL".into(),
                price,
            })
            .collect(),
    )
    .unwrap();

    let outcome = run_combined(&crossover_only(0.0), &series).unwrap();
    let sides: Vec<_> = outcome.result.orders.iter().map(|o| o.side).collect();
    assert_eq!(
        sides,
        vec![
            ticklab_core::domain::OrderSide::Buy,
            ticklab_core::domain::OrderSide::Sell
        ]
    );
}

// ── Boundary fail probabilities ──────────────────────────────────────

#[test]
fn zero_fail_probability_never_rejects() {
    let series = walk(400, 5);
    let outcome = run_combined(&momentum_scalper(0.0), &series).unwrap();
    assert!(outcome.result.stats.submitted() > 0);
    assert_eq!(outcome.result.stats.rejects, 0);
}

#[test]
fn unit_fail_probability_never_fills() {
    let series = walk(400, 5);
    let outcome = run_combined(&momentum_scalper(1.0), &series).unwrap();
    assert!(outcome.result.stats.submitted() > 0);
    assert_eq!(outcome.result.stats.fills, 0);
    assert_eq!(
        outcome.result.stats.rejects,
        outcome.result.stats.submitted()
    );
    // No fill ever touched the ledger.
    assert_eq!(outcome.result.ledger.position, 0);
    assert_eq!(outcome.result.ledger.cash, 100_000.0);
}

// ── Reject-ratio convergence ─────────────────────────────────────────

#[test]
fn reject_ratio_converges_to_fail_probability() {
    let series = walk(5_000, 8);
    let outcome = run_combined(&momentum_scalper(0.3), &series).unwrap();
    let stats = outcome.result.stats;

    assert_eq!(stats.submitted(), outcome.result.orders.len() as u64);
    assert!(stats.submitted() > 4_000, "scalper should trade most ticks");

    let reject_rate = stats.rejects as f64 / stats.submitted() as f64;
    assert!(
        (reject_rate - 0.3).abs() < 0.05,
        "reject rate {reject_rate} too far from 0.3"
    );
}

// ── Determinism ──────────────────────────────────────────────────────

#[test]
fn identical_config_and_seed_reproduce_everything() {
    let series = walk(500, 13);
    let config = RunConfig {
        fail_probability: 0.2,
        ..RunConfig::default()
    };

    let first = run_combined(&config, &series).unwrap();
    let second = run_combined(&config, &series).unwrap();
    assert_eq!(first.result.equity_curve, second.result.equity_curve);
    assert_eq!(first.result.orders, second.result.orders);
    assert_eq!(first.result.stats, second.result.stats);

    let separate_first = run_separate(&config, &series).unwrap();
    let separate_second = run_separate(&config, &series).unwrap();
    for (a, b) in separate_first.iter().zip(&separate_second) {
        assert_eq!(a.result.equity_curve, b.result.equity_curve);
        assert_eq!(a.result.stats, b.result.stats);
    }
}

#[test]
fn master_seed_changes_combined_outcomes() {
    let series = walk(500, 13);
    let config = RunConfig {
        fail_probability: 0.5,
        seed: 1,
        ..RunConfig::default()
    };
    let other = RunConfig { seed: 2, ..config.clone() };

    let a = run_combined(&config, &series).unwrap();
    let b = run_combined(&other, &series).unwrap();
    assert_eq!(a.result.stats.submitted(), b.result.stats.submitted());
    assert_ne!(a.result.orders, b.result.orders);
}

// ── Metrics on degenerate curves ─────────────────────────────────────

#[test]
fn flat_market_yields_zero_sharpe_and_zero_drawdown() {
    let series = constant_series(100, 100.0);
    let outcome = run_combined(&RunConfig::default(), &series).unwrap();

    // Constant prices: crossover ties and zero momentum emit nothing.
    assert_eq!(outcome.result.stats.submitted(), 0);
    assert_eq!(outcome.summary.sharpe_per_period, 0.0);
    assert_eq!(outcome.summary.max_drawdown, 0.0);
    assert_eq!(outcome.summary.total_return, 0.0);
}

#[test]
fn drawdown_stays_in_unit_interval_across_seeds() {
    for seed in 0..10 {
        let series = walk(300, seed);
        let outcome = run_combined(&RunConfig::default(), &series).unwrap();
        let dd = outcome.summary.max_drawdown;
        assert!((0.0..=1.0).contains(&dd), "seed {seed}: drawdown {dd}");
    }
}

// ── Combined vs separate ─────────────────────────────────────────────

#[test]
fn combined_is_one_ledger_separate_are_isolated() {
    let series = walk(300, 21);
    let config = RunConfig {
        fail_probability: 0.0,
        ..RunConfig::default()
    };

    let combined = run_combined(&config, &series).unwrap();
    let separate = run_separate(&config, &series).unwrap();

    // With no rejections the fill streams are purely strategy-driven, so
    // the combined position is the sum of the isolated positions.
    let separate_position: i64 = separate.iter().map(|o| o.result.ledger.position).sum();
    assert_eq!(combined.result.ledger.position, separate_position);

    let separate_fills: u64 = separate.iter().map(|o| o.result.stats.fills).sum();
    assert_eq!(combined.result.stats.fills, separate_fills);
}

// ── Metrics helpers stay consistent with run output ──────────────────

#[test]
fn summary_matches_direct_metric_calls() {
    let series = walk(250, 17);
    let outcome = run_combined(&RunConfig::default(), &series).unwrap();
    let equities: Vec<f64> = outcome
        .result
        .equity_curve
        .iter()
        .map(|p| p.equity)
        .collect();

    assert_eq!(
        outcome.summary.total_return,
        metrics::total_return(&equities)
    );
    assert_eq!(
        outcome.summary.sharpe_per_period,
        metrics::sharpe_per_period(&equities)
    );
    assert_eq!(outcome.summary.max_drawdown, metrics::max_drawdown(&equities));
}
