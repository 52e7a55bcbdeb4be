//! sigreplay — deterministic signal-replay backtester.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`]. The core entry
//! point is [`domain::engine::run_backtest`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
