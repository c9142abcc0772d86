//! Shared models for the visualization server's wire surfaces.
//!
//! Contains the signal/strategy/data-source enums with their wire names and
//! fixed policy tables, the session parameter set, and per-endpoint payload
//! modules.

pub mod backtest;
pub mod historical;
pub mod live;

use serde::{Deserialize, Serialize};

/// Trading signal attached to a live tick. Wire encoding: `1` buy, `-1`
/// sell, `0` none. Bulk history never carries signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    None,
}

impl From<i64> for Signal {
    fn from(value: i64) -> Self {
        match value {
            1 => Signal::Buy,
            -1 => Signal::Sell,
            _ => Signal::None,
        }
    }
}

impl From<Signal> for i64 {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::None => 0,
        }
    }
}

/// Strategy ids understood by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    SmaCrossover,
    RsiMomentum,
}

impl Strategy {
    /// Returns the wire-format strategy id expected by the server.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::SmaCrossover => "sma_crossover",
            Strategy::RsiMomentum => "rsi_momentum",
        }
    }
}

/// Market-data source classes offered by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Sample,
    YFinance,
    Binance,
}

impl DataSource {
    /// Returns the wire-format source name expected by the server.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Sample => "sample",
            DataSource::YFinance => "yfinance",
            DataSource::Binance => "binance",
        }
    }

    /// Fixed `(interval, lookback)` window for bulk history.
    ///
    /// Binance history is loaded at a fine short-range window so movement is
    /// visible and matches its one-minute live stream; the other sources use
    /// a coarse long-range window.
    pub fn historical_window(&self) -> (&'static str, &'static str) {
        match self {
            DataSource::Binance => ("1m", "12h"),
            _ => ("1h", "7d"),
        }
    }

    /// Fixed tick-speed hint passed to the live stream, in milliseconds.
    ///
    /// Only the mock stream honors it; Binance ticks on real one-minute
    /// klines.
    pub fn speed_ms(&self) -> u64 {
        match self {
            DataSource::Binance => 60_000,
            _ => 250,
        }
    }
}

/// User-chosen session parameters (the form-state boundary).
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub symbol: String,
    pub strategy: Strategy,
    pub fast: u32,
    pub slow: u32,
    pub rsi_period: u32,
    pub source: DataSource,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            symbol: "BTC-USD".to_string(),
            strategy: Strategy::SmaCrossover,
            fast: 10,
            slow: 20,
            rsi_period: 14,
            source: DataSource::Sample,
        }
    }
}
