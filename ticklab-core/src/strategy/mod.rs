//! Strategy trait and the signal generators that implement it.

pub mod ma_crossover;
pub mod momentum;

pub use ma_crossover::MaCrossover;
pub use momentum::Momentum;

use crate::domain::{MarketObservation, OrderIntent};
use thiserror::Error;

/// A per-tick signal failure inside one strategy.
///
/// Non-fatal by contract: the engine counts it, logs it, and continues with
/// the remaining strategies and ticks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StrategyError {
    #[error("degenerate window: reference price {price} at lookback offset {lookback}")]
    DegenerateWindow { lookback: usize, price: f64 },
}

/// Polymorphic signal generator.
///
/// Implementations must be pure functions of the observation history: the
/// only state they carry is their configured parameters, so identical
/// history always yields the identical intent. That purity is what makes a
/// run deterministic under a fixed seed.
pub trait Strategy: Send + Sync {
    /// Stable name, used for run labels and log fields.
    fn name(&self) -> &str;

    /// Number of ticks that must accumulate before a signal can fire.
    fn warmup_ticks(&self) -> usize;

    /// Inspect the history up to and including the current tick and emit at
    /// most one order intent.
    fn on_tick(&self, history: &[MarketObservation])
        -> Result<Option<OrderIntent>, StrategyError>;
}

/// Simple moving average over the trailing `window` observations.
///
/// Callers guarantee `history.len() >= window >= 1`.
pub(crate) fn trailing_mean(history: &[MarketObservation], window: usize) -> f64 {
    let tail = &history[history.len() - window..];
    tail.iter().map(|obs| obs.price).sum::<f64>() / window as f64
}
