//! Domain types: observations, orders, and the ledger.

pub mod ledger;
pub mod observation;
pub mod order;

pub use ledger::Ledger;
pub use observation::{MarketObservation, PriceSeries, SeriesError};
pub use order::{Order, OrderIntent, OrderSide, OrderStatus, RejectReason};
