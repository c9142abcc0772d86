//! One-shot backtest execution and result rendering.
//!
//! Unlike the historical loader, rendering here is not gated on success:
//! the output object is always displayed for diagnostics, even when the
//! request failed or the body didn't parse. Only the equity replace and the
//! summary line additionally require their fields to be present.

use std::sync::Arc;

use tracing::info;
use url::Url;

use crate::Result;
use crate::alert::{AlertSink, OUTPUT_EXCERPT_LEN, excerpt};
use crate::chart::SharedChartState;
use crate::generation::Generation;
use crate::models::backtest::{BacktestRequest, BacktestResult};

/// Runs backtests against `POST /api/backtest` and renders the results.
pub struct BacktestController {
    client: reqwest::Client,
    api_url: String,
    alerts: Arc<dyn AlertSink>,
}

impl BacktestController {
    #[must_use]
    pub fn new(api_url: impl Into<String>, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            alerts,
        }
    }

    /// Runs one backtest and renders its output.
    ///
    /// The body is parsed as JSON regardless of status; an unparseable body
    /// becomes a result whose `error` holds a truncated raw excerpt. A
    /// non-2xx status surfaces the server's `detail` (else `error`, else a
    /// generic message) without preventing the rendering below. If the
    /// result carries an equity curve it replaces the equity timeline
    /// wholesale; if it carries a PnL figure the one-line summary is
    /// rendered. A result arriving after `generation` has advanced is
    /// returned but not rendered.
    ///
    /// # Errors
    ///
    /// Returns [`TickboardError::Transport`](crate::TickboardError::Transport)
    /// if the request never produced a body, and propagates
    /// [`TickboardError::ChartDesync`](crate::TickboardError::ChartDesync)
    /// from the equity replace.
    pub async fn run(
        &self,
        request: &BacktestRequest,
        charts: &SharedChartState,
        generation: &Generation,
    ) -> Result<BacktestResult> {
        let mut url = Url::parse(&self.api_url)?;
        url.set_path("/api/backtest");

        info!(
            symbol = %request.symbol,
            strategy = %request.strategy,
            start = %request.start,
            end = %request.end,
            "Running backtest"
        );
        let response = match self.client.post(url).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                self.alerts.alert("backtest", &e.to_string());
                return Err(e.into());
            }
        };
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                self.alerts.alert("backtest", &e.to_string());
                return Err(e.into());
            }
        };

        let result = match serde_json::from_str::<BacktestResult>(&body) {
            Ok(result) => result,
            Err(_) => BacktestResult {
                error: Some(excerpt(&body, OUTPUT_EXCERPT_LEN)),
                ..BacktestResult::default()
            },
        };

        if !status.is_success() {
            let message = result
                .detail
                .clone()
                .or_else(|| result.error.clone())
                .unwrap_or_else(|| "Backtest failed".to_string());
            self.alerts.alert("backtest", &message);
        }

        if !generation.is_current() {
            info!(symbol = %request.symbol, "Discarding stale backtest result");
            return Ok(result);
        }

        let rendered = serde_json::to_string_pretty(&result)?;
        let mut state = charts.lock().await;
        state.show_backtest_output(&rendered);

        if let Some(points) = &result.equity {
            state.replace_equity_timeline(points)?;
        }
        if let Some(pnl) = result.pnl {
            let line = format!("PnL: {:.2} | Trades: {}", pnl, result.num_trades.unwrap_or(0));
            state.show_backtest_summary(&line);
        }

        Ok(result)
    }
}
