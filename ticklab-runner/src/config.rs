//! Serializable run configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ticklab_core::engine::EngineConfig;
use ticklab_core::strategy::{MaCrossover, Momentum, Strategy};
use ticklab_core::ConfigError;

/// Unique identifier for a run configuration (content-addressable hash).
pub type RunId = String;

/// Errors raised while reading or validating a run configuration.
#[derive(Debug, Error)]
pub enum RunConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// Serializable configuration for a full run.
///
/// Captures everything needed to reproduce a backtest: the strategy
/// parameter set, starting cash, fail probability, and the master seed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Symbol the run trades (informational; strategies echo it back).
    pub symbol: String,

    /// Starting cash for every ledger.
    pub initial_cash: f64,

    /// Probability that the simulator rejects a submitted intent.
    pub fail_probability: f64,

    /// Master seed; per-run sub-seeds are derived from it.
    pub seed: u64,

    /// Strategies to run.
    pub strategies: Vec<StrategyConfig>,
}

impl RunConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml(input: &str) -> Result<Self, RunConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every parameter, building each strategy once to surface
    /// its constructor diagnostics.
    pub fn validate(&self) -> Result<(), ConfigError> {
        EngineConfig::new(self.initial_cash, self.fail_probability, self.seed)?;
        if self.strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        for strategy in &self.strategies {
            strategy.build()?;
        }
        Ok(())
    }

    /// Build all configured strategies.
    pub fn build_strategies(&self) -> Result<Vec<Box<dyn Strategy>>, ConfigError> {
        self.strategies.iter().map(StrategyConfig::build).collect()
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share the same RunId, which makes
    /// report artifacts comparable across invocations.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        format!("{}", hash.to_hex())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            symbol: "AAPL".into(),
            initial_cash: 100_000.0,
            fail_probability: 0.01,
            seed: 42,
            strategies: vec![
                StrategyConfig::MaCrossover {
                    fast: 5,
                    slow: 20,
                    quantity: 10,
                },
                StrategyConfig::Momentum {
                    lookback: 10,
                    threshold: 0.005,
                    quantity: 5,
                },
            ],
        }
    }
}

/// Strategy configuration (serializable tagged enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Fast SMA crossing a slow SMA.
    MaCrossover {
        fast: usize,
        slow: usize,
        quantity: u32,
    },

    /// Relative change over a lookback window against a threshold.
    Momentum {
        lookback: usize,
        threshold: f64,
        quantity: u32,
    },
}

impl StrategyConfig {
    /// Stable label, used for run naming and sub-seed derivation.
    pub fn label(&self) -> &'static str {
        match self {
            StrategyConfig::MaCrossover { .. } => "ma_crossover",
            StrategyConfig::Momentum { .. } => "momentum",
        }
    }

    /// Build the configured strategy, validating its parameters.
    pub fn build(&self) -> Result<Box<dyn Strategy>, ConfigError> {
        match *self {
            StrategyConfig::MaCrossover {
                fast,
                slow,
                quantity,
            } => Ok(Box::new(MaCrossover::new(fast, slow, quantity)?)),
            StrategyConfig::Momentum {
                lookback,
                threshold,
                quantity,
            } => Ok(Box::new(Momentum::new(lookback, threshold, quantity)?)),
        }
    }
}
