//! One-shot historical snapshot loading.
//!
//! A successful load **replaces** the entire price timeline; a failed one
//! leaves chart state untouched and surfaces a single user-visible error.
//! The replace only happens after a fully parsed, successful response.

use std::sync::Arc;

use tracing::info;
use url::Url;

use crate::Result;
use crate::TickboardError;
use crate::alert::{AlertSink, DETAIL_EXCERPT_LEN, excerpt};
use crate::chart::SharedChartState;
use crate::generation::Generation;
use crate::models::DataSource;
use crate::models::historical::HistoricalResponse;

/// Fetches bulk price history from `GET /api/historical`.
pub struct HistoricalLoader {
    client: reqwest::Client,
    api_url: String,
    alerts: Arc<dyn AlertSink>,
}

impl HistoricalLoader {
    #[must_use]
    pub fn new(api_url: impl Into<String>, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            alerts,
        }
    }

    /// Loads a snapshot for `symbol` and replaces the price timeline.
    ///
    /// The interval/lookback window is a fixed policy of the data source
    /// (see [`DataSource::historical_window`]). A response arriving after
    /// `generation` has advanced is discarded without touching the charts.
    ///
    /// # Errors
    ///
    /// Surfaces the failure through the alert sink and returns it:
    /// [`TickboardError::Transport`] for connection failures,
    /// [`TickboardError::MalformedBody`] for a non-parseable body (truncated
    /// raw excerpt), [`TickboardError::Api`] for a non-2xx status (the
    /// server's `detail` message when present). Chart state is unchanged in
    /// every error case.
    pub async fn load(
        &self,
        symbol: &str,
        source: DataSource,
        charts: &SharedChartState,
        generation: &Generation,
    ) -> Result<()> {
        match self.fetch(symbol, source).await {
            Ok(snapshot) => {
                if !generation.is_current() {
                    info!(symbol, "Discarding stale historical response");
                    return Ok(());
                }
                let mut state = charts.lock().await;
                state.replace_price_timeline(snapshot.t, snapshot.c)
            }
            Err(e) => {
                self.alerts.alert("historical data", &e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch(&self, symbol: &str, source: DataSource) -> Result<HistoricalResponse> {
        let (interval, lookback) = source.historical_window();
        let mut url = Url::parse(&self.api_url)?;
        url.set_path("/api/historical");
        url.query_pairs_mut()
            .append_pair("symbol", symbol)
            .append_pair("interval", interval)
            .append_pair("lookback", lookback)
            .append_pair("source", source.as_str());

        info!(symbol, interval, lookback, source = source.as_str(), "Fetching historical snapshot");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Parse before inspecting the status so an error body's detail text
        // is available, falling back to a raw excerpt when it isn't JSON.
        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|_| TickboardError::MalformedBody(excerpt(&body, DETAIL_EXCERPT_LEN)))?;

        if !status.is_success() {
            let detail = value
                .get("detail")
                .and_then(|d| d.as_str())
                .map(String::from)
                .unwrap_or_else(|| "Historical fetch failed".to_string());
            return Err(TickboardError::Api(detail));
        }

        Ok(serde_json::from_value(value)?)
    }
}
