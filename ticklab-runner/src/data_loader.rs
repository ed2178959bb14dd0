//! CSV market data loading.
//!
//! Reads `timestamp,symbol,price` rows, sorts them chronologically, and
//! hands the result to [`PriceSeries::new`] for validation. Any malformed
//! input is a fatal load error; nothing partial ever reaches the engine.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use ticklab_core::domain::{MarketObservation, PriceSeries, SeriesError};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV must contain columns: timestamp, symbol, price (found: {found})")]
    MissingColumns { found: String },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("record {record}: unparseable timestamp '{value}'")]
    BadTimestamp { record: usize, value: String },

    #[error("invalid series: {0}")]
    Series(#[from] SeriesError),
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    symbol: String,
    price: f64,
}

/// Load a market data CSV into a validated, time-ordered series.
pub fn load_market_data(path: &Path) -> Result<PriceSeries, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    for required in ["timestamp", "symbol", "price"] {
        if !headers.iter().any(|column| column.trim() == required) {
            return Err(LoadError::MissingColumns {
                found: headers.iter().collect::<Vec<_>>().join(","),
            });
        }
    }

    let mut observations = Vec::new();
    for (record, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let timestamp = parse_timestamp(&row.timestamp).ok_or(LoadError::BadTimestamp {
            record,
            value: row.timestamp.clone(),
        })?;
        observations.push(MarketObservation {
            timestamp,
            symbol: row.symbol,
            price: row.price,
        });
    }

    observations.sort_by_key(|obs| obs.timestamp);
    Ok(PriceSeries::new(observations)?)
}

/// Accepts RFC 3339 or a naive ISO-8601 timestamp (interpreted as UTC).
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }
    None
}
