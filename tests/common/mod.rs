//! Shared test doubles: recording render surface and alert sink.

use std::sync::{Arc, Mutex};

use tickboard::alert::AlertSink;
use tickboard::chart::{EquityTimeline, PriceTimeline, RenderSurface};
use tickboard::models::Signal;

/// One draw call observed by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    PriceRedraw { points: usize, buys: usize, sells: usize },
    AppendedDraw { label: String, close: f64, signal: Signal },
    EquityRedraw { points: usize },
    BacktestOutput(String),
    Summary(String),
}

/// Surface that records every draw so tests can assert on redraw
/// granularity (full vs incremental) as well as content.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub events: Arc<Mutex<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl RenderSurface for RecordingSurface {
    fn redraw_price(&mut self, timeline: &PriceTimeline) {
        self.events.lock().unwrap().push(SurfaceEvent::PriceRedraw {
            points: timeline.labels.len(),
            buys: timeline.buys.len(),
            sells: timeline.sells.len(),
        });
    }

    fn draw_appended(&mut self, label: &str, close: f64, signal: Signal) {
        self.events.lock().unwrap().push(SurfaceEvent::AppendedDraw {
            label: label.to_string(),
            close,
            signal,
        });
    }

    fn redraw_equity(&mut self, timeline: &EquityTimeline) {
        self.events.lock().unwrap().push(SurfaceEvent::EquityRedraw {
            points: timeline.labels.len(),
        });
    }

    fn show_backtest_output(&mut self, raw: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SurfaceEvent::BacktestOutput(raw.to_string()));
    }

    fn show_backtest_summary(&mut self, line: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SurfaceEvent::Summary(line.to_string()));
    }
}

/// Alert sink that records `(operation, message)` pairs.
#[derive(Debug, Default, Clone)]
pub struct RecordingAlerts {
    pub alerts: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingAlerts {
    pub fn alerts(&self) -> Vec<(String, String)> {
        self.alerts.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn alert(&self, operation: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((operation.to_string(), message.to_string()));
    }
}
