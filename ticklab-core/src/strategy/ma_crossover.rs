//! Moving average crossover — golden cross and death cross detection.
//!
//! Emits BUY when the fast SMA crosses above the slow SMA, SELL when it
//! crosses below. A tie (fast == slow) counts as not crossed on either side.

use super::{trailing_mean, Strategy, StrategyError};
use crate::domain::{MarketObservation, OrderIntent, OrderSide};
use crate::error::ConfigError;

/// Moving average crossover signal generator.
///
/// A crossover compares the current tick's means against the prior tick's,
/// so the first eligible tick is the one where the *prior* tick already has
/// a full slow window: no signal fires until `history.len() > slow`.
#[derive(Debug, Clone)]
pub struct MaCrossover {
    fast: usize,
    slow: usize,
    quantity: u32,
}

impl MaCrossover {
    pub fn new(fast: usize, slow: usize, quantity: u32) -> Result<Self, ConfigError> {
        if fast == 0 {
            return Err(ConfigError::ZeroWindow { name: "fast" });
        }
        if slow == 0 {
            return Err(ConfigError::ZeroWindow { name: "slow" });
        }
        if fast >= slow {
            return Err(ConfigError::FastNotBelowSlow { fast, slow });
        }
        if quantity == 0 {
            return Err(ConfigError::ZeroQuantity);
        }
        Ok(Self {
            fast,
            slow,
            quantity,
        })
    }
}

impl Strategy for MaCrossover {
    fn name(&self) -> &str {
        "ma_crossover"
    }

    fn warmup_ticks(&self) -> usize {
        self.slow
    }

    fn on_tick(
        &self,
        history: &[MarketObservation],
    ) -> Result<Option<OrderIntent>, StrategyError> {
        // Need a full slow window on the prior tick as well.
        if history.len() <= self.slow {
            return Ok(None);
        }

        let Some(current) = history.last() else {
            return Ok(None);
        };
        let previous = &history[..history.len() - 1];

        let fast_cur = trailing_mean(history, self.fast);
        let slow_cur = trailing_mean(history, self.slow);
        let fast_prev = trailing_mean(previous, self.fast);
        let slow_prev = trailing_mean(previous, self.slow);

        // Golden cross: fast moves strictly above slow. Death cross is the
        // mirror image. A tie on the current tick satisfies neither.
        let side = if fast_cur > slow_cur && fast_prev <= slow_prev {
            OrderSide::Buy
        } else if fast_cur < slow_cur && fast_prev >= slow_prev {
            OrderSide::Sell
        } else {
            return Ok(None);
        };

        Ok(Some(OrderIntent {
            side,
            quantity: self.quantity,
            symbol: current.symbol.clone(),
            timestamp: current.timestamp,
        }))
    }
}
