//! ticklab core — engine, domain types, strategies, execution simulation.
//!
//! This crate contains the heart of the backtest lab:
//! - Domain types (observations, validated price series, orders, ledger)
//! - Tick-by-tick event loop with per-strategy error tolerance
//! - Stochastic execution simulator (one uniform draw per intent)
//! - Strategy trait with moving-average-crossover and momentum generators
//! - Deterministic per-run seed derivation

pub mod domain;
pub mod engine;
pub mod error;
pub mod rng;
pub mod strategy;

pub use error::ConfigError;
