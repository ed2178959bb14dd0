//! Execution simulator — stochastic fill-or-reject for market orders.

use crate::domain::{Order, OrderIntent, RejectReason};
use crate::engine::state::RunStatistics;
use crate::error::ConfigError;
use rand::Rng;

/// Simulates immediate market-order execution with a configurable
/// rejection probability.
///
/// Exactly one uniform value is consumed from the generator per submitted
/// intent, whatever the outcome, so equity curves stay comparable across
/// fail-probability settings under the same seed: changing the probability
/// reclassifies draws, it never shifts the stream.
#[derive(Debug, Clone)]
pub struct ExecutionSimulator {
    fail_probability: f64,
}

impl ExecutionSimulator {
    pub fn new(fail_probability: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&fail_probability) {
            return Err(ConfigError::FailProbabilityOutOfRange {
                value: fail_probability,
            });
        }
        Ok(Self { fail_probability })
    }

    pub fn fail_probability(&self) -> f64 {
        self.fail_probability
    }

    /// Submit an intent against the current price.
    ///
    /// Returns a terminal [`Order`] and bumps the matching counter. The
    /// draw lies in `[0, 1)`, so probability 0 always fills and probability
    /// 1 always rejects.
    pub fn submit<R: Rng>(
        &self,
        intent: &OrderIntent,
        current_price: f64,
        rng: &mut R,
        stats: &mut RunStatistics,
    ) -> Order {
        let order = Order::pending(intent);
        let draw: f64 = rng.gen();
        if draw < self.fail_probability {
            stats.rejects += 1;
            order.rejected(RejectReason::Liquidity)
        } else {
            stats.fills += 1;
            order.filled(current_price)
        }
    }
}
