//! Order intents and the single-transition order lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// A strategy's proposed but unexecuted order. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub side: OrderSide,
    /// Number of units to trade. Always positive; direction lives in `side`.
    pub quantity: u32,
    pub symbol: String,
    /// Timestamp of the observation that produced this intent.
    pub timestamp: DateTime<Utc>,
}

/// Why the simulator rejected an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Simulated venue rejection (no liquidity at the touch).
    Liquidity,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Liquidity => write!(f, "liquidity"),
        }
    }
}

/// Order lifecycle states.
///
/// Terminal variants carry their outcome data, so a filled order cannot
/// exist without a fill price, nor a rejected one without a reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Routed to the simulator, outcome not yet drawn.
    Pending,
    /// Executed in full at `fill_price`.
    Filled { fill_price: f64 },
    /// Dropped by the simulator; never retried.
    Rejected { reason: RejectReason },
}

/// Execution record derived from an [`OrderIntent`].
///
/// The status transitions exactly once, Pending → Filled or
/// Pending → Rejected, via the consuming [`Order::filled`] and
/// [`Order::rejected`] methods. A terminal order is never reopened; there is
/// no way to mutate the status in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub side: OrderSide,
    pub quantity: u32,
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Create a pending order from an intent.
    pub fn pending(intent: &OrderIntent) -> Self {
        Self {
            side: intent.side,
            quantity: intent.quantity,
            symbol: intent.symbol.clone(),
            timestamp: intent.timestamp,
            status: OrderStatus::Pending,
        }
    }

    /// Transition Pending → Filled.
    pub fn filled(self, fill_price: f64) -> Self {
        debug_assert!(
            matches!(self.status, OrderStatus::Pending),
            "order already terminal"
        );
        Self {
            status: OrderStatus::Filled { fill_price },
            ..self
        }
    }

    /// Transition Pending → Rejected.
    pub fn rejected(self, reason: RejectReason) -> Self {
        debug_assert!(
            matches!(self.status, OrderStatus::Pending),
            "order already terminal"
        );
        Self {
            status: OrderStatus::Rejected { reason },
            ..self
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self.status, OrderStatus::Filled { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.status, OrderStatus::Rejected { .. })
    }

    /// Fill price, if the order reached the Filled state.
    pub fn fill_price(&self) -> Option<f64> {
        match self.status {
            OrderStatus::Filled { fill_price } => Some(fill_price),
            _ => None,
        }
    }
}
