//! Backtest controller behavior against a mocked HTTP server.

mod common;

use std::sync::Arc;

use common::{RecordingAlerts, RecordingSurface, SurfaceEvent};
use tickboard::backtest::BacktestController;
use tickboard::chart::ChartState;
use tickboard::generation::GenerationCounter;
use tickboard::models::SessionParams;
use tickboard::models::backtest::BacktestRequest;
use wiremock::matchers::{body_json_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> BacktestRequest {
    BacktestRequest::new(&SessionParams::default(), "2024-01-01", "2024-03-01", 10_000.0)
}

fn fixtures() -> (RecordingSurface, RecordingAlerts, GenerationCounter) {
    (
        RecordingSurface::default(),
        RecordingAlerts::default(),
        GenerationCounter::new(),
    )
}

#[tokio::test]
async fn successful_run_replaces_equity_and_renders_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/backtest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "equity": [
                {"timestamp": "2024-01-01T00:00:00Z", "equity": 10000.0},
                {"timestamp": "2024-01-02T00:00:00Z", "equity": 10500.0}
            ],
            "pnl": 500.0,
            "num_trades": 3
        })))
        .mount(&server)
        .await;

    let (surface, alerts, generations) = fixtures();
    let charts = ChartState::shared(Box::new(surface.clone()));
    let controller = BacktestController::new(server.uri(), Arc::new(alerts.clone()));

    let result = controller
        .run(&request(), &charts, &generations.current())
        .await
        .unwrap();

    assert_eq!(result.pnl, Some(500.0));
    assert_eq!(result.num_trades, Some(3));
    assert!(alerts.alerts().is_empty());

    let state = charts.lock().await;
    assert_eq!(
        state.equity().labels,
        vec!["2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z"]
    );
    assert_eq!(state.equity().values, vec![10_000.0, 10_500.0]);

    let events = surface.events();
    assert!(events.iter().any(|e| matches!(e, SurfaceEvent::BacktestOutput(_))));
    assert!(
        events
            .iter()
            .any(|e| *e == SurfaceEvent::Summary("PnL: 500.00 | Trades: 3".to_string()))
    );
}

#[tokio::test]
async fn request_body_matches_wire_format() {
    let server = MockServer::start().await;
    let expected = serde_json::json!({
        "symbol": "BTC-USD",
        "strategy": "sma_crossover",
        "params": {"fast": 10, "slow": 20, "rsi_period": 14},
        "start": "2024-01-01",
        "end": "2024-03-01",
        "initial_cash": 10000.0,
        "source": "sample"
    });
    Mock::given(method("POST"))
        .and(path("/api/backtest"))
        .and(body_json_string(expected.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let (surface, alerts, generations) = fixtures();
    let charts = ChartState::shared(Box::new(surface));
    let controller = BacktestController::new(server.uri(), Arc::new(alerts));

    controller
        .run(&request(), &charts, &generations.current())
        .await
        .unwrap();
}

#[tokio::test]
async fn server_error_surfaces_detail_but_still_renders_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/backtest"))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_json(serde_json::json!({"detail": "Historical data unavailable for backtest"})),
        )
        .mount(&server)
        .await;

    let (surface, alerts, generations) = fixtures();
    let charts = ChartState::shared(Box::new(surface.clone()));
    let controller = BacktestController::new(server.uri(), Arc::new(alerts.clone()));

    let result = controller
        .run(&request(), &charts, &generations.current())
        .await
        .unwrap();

    assert_eq!(
        result.detail.as_deref(),
        Some("Historical data unavailable for backtest")
    );
    assert_eq!(
        alerts.alerts(),
        vec![(
            "backtest".to_string(),
            "Historical data unavailable for backtest".to_string()
        )]
    );

    // The output object is rendered even though the run failed.
    let events = surface.events();
    assert!(events.iter().any(|e| matches!(e, SurfaceEvent::BacktestOutput(_))));
    // No equity data arrived, so the equity chart was not touched.
    assert!(!events.iter().any(|e| matches!(e, SurfaceEvent::EquityRedraw { .. })));
    assert!(charts.lock().await.equity().labels.is_empty());
}

#[tokio::test]
async fn unparseable_body_renders_truncated_excerpt() {
    let body = "<html>bad gateway</html>".repeat(50);
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/backtest"))
        .respond_with(ResponseTemplate::new(502).set_body_string(body.clone()))
        .mount(&server)
        .await;

    let (surface, alerts, generations) = fixtures();
    let charts = ChartState::shared(Box::new(surface.clone()));
    let controller = BacktestController::new(server.uri(), Arc::new(alerts.clone()));

    let result = controller
        .run(&request(), &charts, &generations.current())
        .await
        .unwrap();

    let error = result.error.expect("raw excerpt kept as the error field");
    assert_eq!(error.chars().count(), 500);
    assert!(body.starts_with(&error));

    // The excerpt doubles as the alert (no detail field available).
    let alerts = alerts.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].1, error);

    // And it is what got rendered to the output panel.
    let events = surface.events();
    let rendered = events
        .iter()
        .find_map(|e| match e {
            SurfaceEvent::BacktestOutput(raw) => Some(raw.clone()),
            _ => None,
        })
        .expect("output rendered on failure");
    assert!(rendered.contains("bad gateway"));
}

#[tokio::test]
async fn stale_result_is_returned_but_not_rendered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/backtest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "equity": [{"timestamp": "2024-01-01T00:00:00Z", "equity": 10000.0}],
            "pnl": 0.0,
            "num_trades": 0
        })))
        .mount(&server)
        .await;

    let (surface, alerts, generations) = fixtures();
    let charts = ChartState::shared(Box::new(surface.clone()));
    let controller = BacktestController::new(server.uri(), Arc::new(alerts));

    let generation = generations.current();
    generations.advance();

    let result = controller.run(&request(), &charts, &generation).await.unwrap();

    assert!(result.equity.is_some());
    assert!(surface.events().is_empty());
    assert!(charts.lock().await.equity().labels.is_empty());
}
