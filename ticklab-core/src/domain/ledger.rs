//! Ledger — cash plus signed position, mutated only by confirmed fills.

use super::order::{Order, OrderSide, OrderStatus};
use serde::{Deserialize, Serialize};

/// Cash-and-position ledger for a single symbol.
///
/// Accounting is deliberately permissive, matching the observed contract of
/// a backtest rather than a live system: a BUY is never rejected for
/// insufficient cash (cash may go negative) and a SELL is never rejected for
/// a missing position (the position may go negative, i.e. an implicit
/// short). **This is a non-realistic simplification**; interpret equity
/// curves produced under heavy overdraft or shorting accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub cash: f64,
    /// Signed position in units. Negative means short.
    pub position: i64,
}

impl Ledger {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            cash: initial_cash,
            position: 0,
        }
    }

    /// Apply a terminal order. No-op unless the order is Filled.
    ///
    /// BUY: `cash -= quantity * fill_price`, `position += quantity`.
    /// SELL: the exact inverse.
    pub fn apply(&mut self, order: &Order) {
        let OrderStatus::Filled { fill_price } = order.status else {
            return;
        };
        let notional = f64::from(order.quantity) * fill_price;
        match order.side {
            OrderSide::Buy => {
                self.cash -= notional;
                self.position += i64::from(order.quantity);
            }
            OrderSide::Sell => {
                self.cash += notional;
                self.position -= i64::from(order.quantity);
            }
        }
    }

    /// Mark-to-market equity: `cash + position * current_price`.
    pub fn equity(&self, current_price: f64) -> f64 {
        self.cash + self.position as f64 * current_price
    }
}
