//! Backtest endpoint payloads.

use serde::{Deserialize, Serialize};

use crate::models::SessionParams;

/// Per-strategy tuning parameters sent with a backtest request.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyParams {
    pub fast: u32,
    pub slow: u32,
    pub rsi_period: u32,
}

/// Request body for `POST /api/backtest`.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestRequest {
    pub symbol: String,
    pub strategy: String,
    pub params: StrategyParams,
    pub start: String,
    pub end: String,
    pub initial_cash: f64,
    pub source: String,
}

impl BacktestRequest {
    /// Builds a request from the session parameters plus the explicit date
    /// range and initial cash.
    #[must_use]
    pub fn new(params: &SessionParams, start: &str, end: &str, initial_cash: f64) -> Self {
        Self {
            symbol: params.symbol.clone(),
            strategy: params.strategy.as_str().to_string(),
            params: StrategyParams {
                fast: params.fast,
                slow: params.slow,
                rsi_period: params.rsi_period,
            },
            start: start.to_string(),
            end: end.to_string(),
            initial_cash,
            source: params.source.as_str().to_string(),
        }
    }
}

/// One point on the equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: String,
    pub equity: f64,
}

/// A single fill from the simulated trade log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: String,
    pub symbol: String,
    pub side: String,
    pub price: f64,
    pub size: f64,
}

/// Response body from `POST /api/backtest`.
///
/// Every field is optional at the parse layer: error responses carry only
/// `detail`/`error`, and an unparseable body is represented by an `error`
/// holding the raw excerpt. The whole object is rendered for diagnostics
/// regardless of which fields are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BacktestResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equity: Option<Vec<EquityPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_trades: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_cash: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_cash: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trades: Option<Vec<TradeRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
