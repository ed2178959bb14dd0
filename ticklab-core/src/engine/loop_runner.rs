//! Tick-by-tick event loop — the heart of the backtest engine.
//!
//! Per observation, in order:
//! 1. Append the observation to the shared strategy-visible history.
//! 2. Ask each strategy for a signal; a failing strategy is counted,
//!    logged, and skipped for this tick only.
//! 3. Route each intent through the execution simulator and apply the
//!    resulting order to the ledger.
//! 4. Record one equity point at the current price, orders or not.

use crate::domain::{Ledger, MarketObservation, Order, PriceSeries};
use crate::engine::execution::ExecutionSimulator;
use crate::engine::state::{EngineConfig, EquityPoint, RunResult, RunStatistics};
use crate::error::ConfigError;
use crate::strategy::Strategy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

/// Sequential backtest engine over one validated price series.
///
/// Binding a strategy set and configuration puts the engine in its running
/// state; [`BacktestEngine::run`] consumes it and returns the terminal
/// [`RunResult`], so a completed run cannot be re-entered.
///
/// All bound strategies share one ledger and one equity curve. For isolated
/// per-strategy results, build one engine per strategy with independently
/// derived seeds (see [`crate::rng::RunSeeder`]).
pub struct BacktestEngine {
    config: EngineConfig,
    strategies: Vec<Box<dyn Strategy>>,
    simulator: ExecutionSimulator,
    rng: StdRng,
}

impl std::fmt::Debug for BacktestEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacktestEngine")
            .field("config", &self.config)
            .field("strategies", &self.strategies.len())
            .field("simulator", &self.simulator)
            .finish()
    }
}

impl BacktestEngine {
    pub fn new(
        config: EngineConfig,
        strategies: Vec<Box<dyn Strategy>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        let simulator = ExecutionSimulator::new(config.fail_probability)?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            strategies,
            simulator,
            rng,
        })
    }

    /// Replay the series to completion.
    pub fn run(mut self, series: &PriceSeries) -> RunResult {
        let mut ledger = Ledger::new(self.config.initial_cash);
        let mut stats = RunStatistics::default();
        let mut orders: Vec<Order> = Vec::new();
        let mut equity_curve = Vec::with_capacity(series.len());
        let mut history: Vec<MarketObservation> = Vec::with_capacity(series.len());

        for observation in series.iter() {
            history.push(observation.clone());

            for strategy in &self.strategies {
                let intent = match strategy.on_tick(&history) {
                    Ok(Some(intent)) => intent,
                    Ok(None) => continue,
                    Err(error) => {
                        stats.errors += 1;
                        warn!(
                            strategy = strategy.name(),
                            timestamp = %observation.timestamp,
                            error = %error,
                            "strategy failed, tick skipped"
                        );
                        continue;
                    }
                };

                let order =
                    self.simulator
                        .submit(&intent, observation.price, &mut self.rng, &mut stats);
                ledger.apply(&order);
                orders.push(order);
            }

            equity_curve.push(EquityPoint {
                timestamp: observation.timestamp,
                equity: ledger.equity(observation.price),
            });
        }

        let final_equity = equity_curve
            .last()
            .map(|point| point.equity)
            .unwrap_or(self.config.initial_cash);

        RunResult {
            equity_curve,
            orders,
            stats,
            ledger,
            final_equity,
        }
    }
}
