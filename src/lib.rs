//! Chart-state synchronization client for a trading-strategy visualization
//! server.
//!
//! Reconciles three independently-arriving data sources — a one-shot
//! historical snapshot, an open-ended live tick stream, and a one-shot
//! backtest result — into two chart timelines (price with signal markers,
//! equity) behind a single mutation gate that keeps the backing arrays in
//! lockstep.

pub mod alert;
pub mod backtest;
pub mod chart;
pub mod config;
pub mod error;
pub mod generation;
pub mod historical;
pub mod live;
pub mod models;

pub use error::{Result, TickboardError};
