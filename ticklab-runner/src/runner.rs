//! Run orchestration — combined and separate backtest runs.
//!
//! Combined mode binds every configured strategy to one engine: one shared
//! ledger, one equity curve, one statistics block, with interaction effects
//! intact. Separate mode builds an isolated engine per strategy; those runs
//! share nothing and execute in parallel, each drawing from its own
//! BLAKE3-derived sub-seed so thread scheduling cannot perturb results.

use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::config::RunConfig;
use crate::metrics::PerformanceSummary;
use ticklab_core::domain::PriceSeries;
use ticklab_core::engine::{BacktestEngine, EngineConfig, RunResult};
use ticklab_core::rng::RunSeeder;
use ticklab_core::ConfigError;

/// Label under which the combined run derives its random stream.
const COMBINED_LABEL: &str = "combined";

/// Errors from run orchestration.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A completed, labeled run with its computed metrics.
#[derive(Debug)]
pub struct RunOutcome {
    pub label: String,
    pub result: RunResult,
    pub summary: PerformanceSummary,
}

/// Run every configured strategy in one engine over a shared ledger.
pub fn run_combined(config: &RunConfig, series: &PriceSeries) -> Result<RunOutcome, RunnerError> {
    let seeder = RunSeeder::new(config.seed);
    let outcome = run_labeled(
        config,
        series,
        COMBINED_LABEL,
        seeder.sub_seed(COMBINED_LABEL),
        config.build_strategies()?,
    )?;
    Ok(outcome)
}

/// Run each configured strategy in its own isolated engine, in parallel.
///
/// Outcomes come back in configuration order regardless of scheduling.
pub fn run_separate(
    config: &RunConfig,
    series: &PriceSeries,
) -> Result<Vec<RunOutcome>, RunnerError> {
    let seeder = RunSeeder::new(config.seed);
    config
        .strategies
        .par_iter()
        .enumerate()
        .map(|(index, strategy)| {
            let label = strategy.label();
            // Index keeps sub-seeds distinct when one strategy type is
            // configured more than once.
            let sub_seed = seeder.sub_seed(&format!("separate:{index}:{label}"));
            run_labeled(config, series, label, sub_seed, vec![strategy.build()?])
        })
        .collect()
}

fn run_labeled(
    config: &RunConfig,
    series: &PriceSeries,
    label: &str,
    sub_seed: u64,
    strategies: Vec<Box<dyn ticklab_core::strategy::Strategy>>,
) -> Result<RunOutcome, RunnerError> {
    let engine_config = EngineConfig::new(config.initial_cash, config.fail_probability, sub_seed)?;
    let engine = BacktestEngine::new(engine_config, strategies)?;
    let result = engine.run(series);
    let summary = PerformanceSummary::compute(&result.equity_curve);

    info!(
        run = label,
        ticks = result.equity_curve.len(),
        fills = result.stats.fills,
        rejects = result.stats.rejects,
        errors = result.stats.errors,
        final_equity = result.final_equity,
        "run complete"
    );

    Ok(RunOutcome {
        label: label.to_string(),
        result,
        summary,
    })
}
