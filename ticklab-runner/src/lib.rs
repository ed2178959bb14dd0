//! ticklab runner — configuration, data loading, metrics, reporting, and
//! run orchestration over the core engine.

pub mod config;
pub mod data_loader;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod synthetic;

pub use config::{RunConfig, RunConfigError, StrategyConfig};
pub use data_loader::{load_market_data, LoadError};
pub use metrics::PerformanceSummary;
pub use runner::{run_combined, run_separate, RunOutcome, RunnerError};
pub use synthetic::{random_walk, WalkParams};
