//! Synthetic market data — a seeded random walk.
//!
//! Used by demos, integration tests, and benchmarks when no CSV is at
//! hand. Tick returns are `drift + volatility * noise` with noise uniform
//! in [-1, 1], floored so prices stay strictly positive and always pass
//! series validation.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ticklab_core::domain::{MarketObservation, PriceSeries, SeriesError};

/// Parameters for the random walk.
#[derive(Debug, Clone)]
pub struct WalkParams {
    pub symbol: String,
    pub start: DateTime<Utc>,
    pub ticks: usize,
    pub start_price: f64,
    /// Mean per-tick return.
    pub drift: f64,
    /// Per-tick noise amplitude.
    pub volatility: f64,
    pub seed: u64,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            symbol: "AAPL".into(),
            start: DateTime::<Utc>::UNIX_EPOCH,
            ticks: 250,
            start_price: 100.0,
            drift: 0.0002,
            volatility: 0.01,
            seed: 42,
        }
    }
}

/// Price floor as a fraction of the starting price.
const PRICE_FLOOR_FRACTION: f64 = 0.01;

/// Generate a random-walk price series, one observation per second.
///
/// Fails only on degenerate parameters (zero ticks, non-positive start
/// price), surfaced through the usual series validation.
pub fn random_walk(params: &WalkParams) -> Result<PriceSeries, SeriesError> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut price = params.start_price;
    let floor = params.start_price * PRICE_FLOOR_FRACTION;

    let observations = (0..params.ticks)
        .map(|i| {
            if i > 0 {
                let noise: f64 = rng.gen_range(-1.0..=1.0);
                price *= 1.0 + params.drift + params.volatility * noise;
                price = price.max(floor);
            }
            MarketObservation {
                timestamp: params.start + Duration::seconds(i as i64),
                symbol: params.symbol.clone(),
                price,
            }
        })
        .collect();

    PriceSeries::new(observations)
}
