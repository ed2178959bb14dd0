//! Construction-time error taxonomy.
//!
//! Everything here is fatal and raised before any tick runs; per-tick
//! failures use [`crate::strategy::StrategyError`] instead, and simulated
//! rejections are ordinary [`crate::domain::Order`] outcomes, not errors.

use thiserror::Error;

/// Invalid engine or strategy configuration.
///
/// Each variant names the offending parameter so a failed construction
/// yields a usable diagnostic.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} window must be at least 1")]
    ZeroWindow { name: &'static str },

    #[error("fast window ({fast}) must be smaller than slow window ({slow})")]
    FastNotBelowSlow { fast: usize, slow: usize },

    #[error("lookback must be at least 1")]
    ZeroLookback,

    #[error("threshold must be non-negative, got {value}")]
    NegativeThreshold { value: f64 },

    #[error("order quantity must be positive")]
    ZeroQuantity,

    #[error("initial cash must be positive and finite, got {value}")]
    InvalidInitialCash { value: f64 },

    #[error("fail probability must be within [0, 1], got {value}")]
    FailProbabilityOutOfRange { value: f64 },

    #[error("engine requires at least one strategy")]
    NoStrategies,
}
