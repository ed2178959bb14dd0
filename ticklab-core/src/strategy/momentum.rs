//! Momentum — relative price change over a fixed lookback.
//!
//! Emits BUY when the change over `lookback` ticks exceeds the threshold,
//! SELL when it falls below the negated threshold. Both comparisons are
//! strict, so a change of exactly the threshold emits nothing.

use super::{Strategy, StrategyError};
use crate::domain::{MarketObservation, OrderIntent, OrderSide};
use crate::error::ConfigError;

/// Momentum signal generator.
#[derive(Debug, Clone)]
pub struct Momentum {
    lookback: usize,
    threshold: f64,
    quantity: u32,
}

impl Momentum {
    pub fn new(lookback: usize, threshold: f64, quantity: u32) -> Result<Self, ConfigError> {
        if lookback == 0 {
            return Err(ConfigError::ZeroLookback);
        }
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::NegativeThreshold { value: threshold });
        }
        if quantity == 0 {
            return Err(ConfigError::ZeroQuantity);
        }
        Ok(Self {
            lookback,
            threshold,
            quantity,
        })
    }
}

impl Strategy for Momentum {
    fn name(&self) -> &str {
        "momentum"
    }

    fn warmup_ticks(&self) -> usize {
        self.lookback
    }

    fn on_tick(
        &self,
        history: &[MarketObservation],
    ) -> Result<Option<OrderIntent>, StrategyError> {
        if history.len() < self.lookback + 1 {
            return Ok(None);
        }

        let Some(current) = history.last() else {
            return Ok(None);
        };
        let reference = &history[history.len() - 1 - self.lookback];

        // A validated series cannot hold non-positive prices; raw histories
        // can, and dividing by one would poison the signal.
        if reference.price <= 0.0 {
            return Err(StrategyError::DegenerateWindow {
                lookback: self.lookback,
                price: reference.price,
            });
        }

        let change = (current.price - reference.price) / reference.price;
        let side = if change > self.threshold {
            OrderSide::Buy
        } else if change < -self.threshold {
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
