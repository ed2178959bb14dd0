//! Market observations and the validated price series the engine replays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single market observation.
///
/// Created once by a loader or generator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketObservation {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub price: f64,
}

/// Errors raised while constructing a [`PriceSeries`].
///
/// These are fatal, construction-time errors: a malformed series never
/// reaches the engine loop.
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("price series is empty")]
    Empty,

    #[error("observation {index} has non-positive price {price}")]
    NonPositivePrice { index: usize, price: f64 },

    #[error("observation {index} has non-finite price")]
    NonFinitePrice { index: usize },

    #[error("observation {index} is out of order: {current} precedes {previous}")]
    OutOfOrder {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

/// Time-ordered, validated sequence of observations.
///
/// Invariants, checked at construction:
/// - at least one observation
/// - every price is finite and strictly positive
/// - timestamps are monotonically non-decreasing
///
/// Deliberately not `Deserialize`: a series must pass through [`PriceSeries::new`]
/// so an unvalidated sequence cannot reach the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    observations: Vec<MarketObservation>,
}

impl PriceSeries {
    pub fn new(observations: Vec<MarketObservation>) -> Result<Self, SeriesError> {
        if observations.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (index, obs) in observations.iter().enumerate() {
            if !obs.price.is_finite() {
                return Err(SeriesError::NonFinitePrice { index });
            }
            if obs.price <= 0.0 {
                return Err(SeriesError::NonPositivePrice {
                    index,
                    price: obs.price,
                });
            }
            if index > 0 && obs.timestamp < observations[index - 1].timestamp {
                return Err(SeriesError::OutOfOrder {
                    index,
                    previous: observations[index - 1].timestamp,
                    current: obs.timestamp,
                });
            }
        }
        Ok(Self { observations })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarketObservation> {
        self.observations.iter()
    }

    pub fn observations(&self) -> &[MarketObservation] {
        &self.observations
    }
}
