//! Historical snapshot endpoint payloads.

use serde::Deserialize;

/// Bulk history returned by `GET /api/historical`.
///
/// `t` and `c` are parallel arrays: one ISO-8601 timestamp and one close
/// price per candle.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalResponse {
    pub t: Vec<String>,
    pub c: Vec<f64>,
}
