use std::sync::Arc;

use tickboard::TickboardError;
use tickboard::alert::{AlertSink, TracingAlerts};
use tickboard::backtest::BacktestController;
use tickboard::chart::{ChartState, TracingSurface};
use tickboard::config::fetch_config;
use tickboard::generation::GenerationCounter;
use tickboard::historical::HistoricalLoader;
use tickboard::live::LiveStreamController;
use tickboard::models::SessionParams;
use tickboard::models::backtest::BacktestRequest;

#[tokio::main]
async fn main() -> Result<(), TickboardError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let config = fetch_config()?;
    let alerts: Arc<dyn AlertSink> = Arc::new(TracingAlerts);
    let charts = ChartState::shared(Box::new(TracingSurface));
    let generations = GenerationCounter::new();
    let params = SessionParams::default();

    let loader = HistoricalLoader::new(&config.server.api_url, alerts.clone());
    let live = LiveStreamController::new(&config.server.ws_url, alerts.clone());
    let backtests = BacktestController::new(&config.server.api_url, alerts.clone());

    let generation = generations.current();
    loader
        .load(&params.symbol, params.source, &charts, &generation)
        .await?;

    let mut session = live.start(&params, charts.clone()).await?;

    let request = BacktestRequest::new(&params, "2024-01-01", "2024-03-01", 10_000.0);
    backtests.run(&request, &charts, &generation).await?;

    // Append live ticks until interrupted.
    let _ = tokio::signal::ctrl_c().await;
    session.stop().await;

    Ok(())
}
