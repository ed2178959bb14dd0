//! Engine configuration, run counters, and the terminal run result.

use crate::domain::{Ledger, Order};
use crate::error::ConfigError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration for a single backtest run.
///
/// Validated before the first tick: a bad parameter is a fatal
/// construction error, never a mid-run surprise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub initial_cash: f64,
    /// Probability that the simulator rejects a submitted intent.
    pub fail_probability: f64,
    /// Seed for the engine's private random stream.
    pub seed: u64,
}

impl EngineConfig {
    pub fn new(initial_cash: f64, fail_probability: f64, seed: u64) -> Result<Self, ConfigError> {
        let config = Self {
            initial_cash,
            fail_probability,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_cash.is_finite() || self.initial_cash <= 0.0 {
            return Err(ConfigError::InvalidInitialCash {
                value: self.initial_cash,
            });
        }
        if !(0.0..=1.0).contains(&self.fail_probability) {
            return Err(ConfigError::FailProbabilityOutOfRange {
                value: self.fail_probability,
            });
        }
        Ok(())
    }
}

/// Monotone counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub fills: u64,
    pub rejects: u64,
    /// Per-tick strategy failures that were tolerated and skipped.
    pub errors: u64,
}

impl RunStatistics {
    /// Total intents routed to the simulator. Always `fills + rejects`.
    pub fn submitted(&self) -> u64 {
        self.fills + self.rejects
    }
}

/// Mark-to-market equity at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub equity: f64,
}

/// Terminal state of a completed run.
///
/// The equity curve holds exactly one point per input observation, in
/// timestamp order, and is immutable once the run ends.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub equity_curve: Vec<EquityPoint>,
    /// Every order routed to the simulator, in submission order.
    pub orders: Vec<Order>,
    pub stats: RunStatistics,
    /// Final cash/position snapshot.
    pub ledger: Ledger,
    pub final_equity: f64,
}
