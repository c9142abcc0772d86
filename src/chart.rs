//! Chart-backing state for the price and equity timelines.
//!
//! [`ChartState`] owns the only entry points permitted to mutate the
//! chart-backing arrays. The price timeline is replaced wholesale by a
//! historical snapshot and extended one candle at a time by the live stream;
//! the equity timeline is replaced wholesale by each backtest result.
//! Label/value length equality is checked at every mutation and a violation
//! aborts that mutation with [`TickboardError::ChartDesync`] instead of
//! leaving the two arrays out of step.
//!
//! Timelines are append-only and never re-sorted; out-of-order delivery from
//! the feed is a protocol violation the client does not defend against.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::Result;
use crate::TickboardError;
use crate::models::Signal;
use crate::models::backtest::EquityPoint;

/// A `(timestamp, close)` marker placed on the price chart for a buy or
/// sell signal.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPoint {
    pub timestamp: String,
    pub close: f64,
}

/// Backing arrays for the price chart: parallel labels/closes plus the two
/// signal-filtered marker sequences.
#[derive(Debug, Clone, Default)]
pub struct PriceTimeline {
    pub labels: Vec<String>,
    pub closes: Vec<f64>,
    pub buys: Vec<MarkerPoint>,
    pub sells: Vec<MarkerPoint>,
}

/// Backing arrays for the equity chart.
#[derive(Debug, Clone, Default)]
pub struct EquityTimeline {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Rendering boundary toward the charting library.
///
/// Implementations draw; they never own or derive chart data. The
/// incremental hook receives only the newest point and must not rebuild the
/// dataset from scratch.
pub trait RenderSurface: Send {
    /// Full redraw of the price chart after a wholesale replace.
    fn redraw_price(&mut self, timeline: &PriceTimeline);

    /// Additive draw of the single newest candle (and its marker, when the
    /// signal is buy or sell).
    fn draw_appended(&mut self, label: &str, close: f64, signal: Signal);

    /// Full redraw of the equity chart after a wholesale replace.
    fn redraw_equity(&mut self, timeline: &EquityTimeline);

    /// Raw backtest output panel; shown for every run, including failures.
    fn show_backtest_output(&mut self, raw: &str);

    /// One-line backtest summary.
    fn show_backtest_summary(&mut self, line: &str);
}

/// Surface that renders draws as `tracing` events; used by the binary.
#[derive(Debug, Default)]
pub struct TracingSurface;

impl RenderSurface for TracingSurface {
    fn redraw_price(&mut self, timeline: &PriceTimeline) {
        info!(
            points = timeline.labels.len(),
            buys = timeline.buys.len(),
            sells = timeline.sells.len(),
            "Price chart redrawn"
        );
    }

    fn draw_appended(&mut self, label: &str, close: f64, signal: Signal) {
        debug!(label, close, signal = i64::from(signal), "Candle drawn");
    }

    fn redraw_equity(&mut self, timeline: &EquityTimeline) {
        info!(points = timeline.labels.len(), "Equity chart redrawn");
    }

    fn show_backtest_output(&mut self, raw: &str) {
        info!("Backtest output:\n{raw}");
    }

    fn show_backtest_summary(&mut self, line: &str) {
        info!("{line}");
    }
}

/// Shared handle to the chart state, constructed once at startup and passed
/// to every component that reads or mutates the charts.
pub type SharedChartState = Arc<Mutex<ChartState>>;

/// The two chart timelines and their render surface.
pub struct ChartState {
    price: PriceTimeline,
    equity: EquityTimeline,
    surface: Box<dyn RenderSurface>,
}

impl ChartState {
    #[must_use]
    pub fn new(surface: Box<dyn RenderSurface>) -> Self {
        Self {
            price: PriceTimeline::default(),
            equity: EquityTimeline::default(),
            surface,
        }
    }

    /// Constructs the shared handle handed to the loaders and the stream.
    #[must_use]
    pub fn shared(surface: Box<dyn RenderSurface>) -> SharedChartState {
        Arc::new(Mutex::new(Self::new(surface)))
    }

    pub fn price(&self) -> &PriceTimeline {
        &self.price
    }

    pub fn equity(&self) -> &EquityTimeline {
        &self.equity
    }

    /// Replaces the whole price timeline with a historical snapshot.
    ///
    /// All four backing arrays are swapped together: labels and closes come
    /// from the snapshot, both marker sequences are cleared (bulk history
    /// carries no signals). Triggers a full redraw.
    ///
    /// # Errors
    ///
    /// Returns [`TickboardError::ChartDesync`] without mutating anything if
    /// `labels` and `closes` differ in length.
    pub fn replace_price_timeline(&mut self, labels: Vec<String>, closes: Vec<f64>) -> Result<()> {
        check_parallel("price", labels.len(), closes.len())?;

        self.price = PriceTimeline {
            labels,
            closes,
            buys: Vec::new(),
            sells: Vec::new(),
        };
        self.surface.redraw_price(&self.price);
        info!(points = self.price.labels.len(), "Replaced price timeline");

        Ok(())
    }

    /// Appends exactly one candle from the live stream.
    ///
    /// Pushes one label and one close, plus a buy marker iff the signal is
    /// [`Signal::Buy`] or a sell marker iff it is [`Signal::Sell`]. Triggers
    /// an incremental draw carrying only the new point.
    ///
    /// # Errors
    ///
    /// Returns [`TickboardError::ChartDesync`] without mutating anything if
    /// the price arrays are already out of step.
    pub fn append_candle(&mut self, timestamp: &str, close: f64, signal: Signal) -> Result<()> {
        check_parallel("price", self.price.labels.len(), self.price.closes.len())?;

        self.price.labels.push(timestamp.to_string());
        self.price.closes.push(close);
        match signal {
            Signal::Buy => self.price.buys.push(MarkerPoint {
                timestamp: timestamp.to_string(),
                close,
            }),
            Signal::Sell => self.price.sells.push(MarkerPoint {
                timestamp: timestamp.to_string(),
                close,
            }),
            Signal::None => {}
        }
        self.surface.draw_appended(timestamp, close, signal);
        debug!(
            timestamp,
            close,
            signal = i64::from(signal),
            points = self.price.labels.len(),
            "Appended candle"
        );

        Ok(())
    }

    /// Replaces the whole equity timeline with a backtest result.
    ///
    /// Labels and values are swapped together; the curve is never appended
    /// to. Triggers a full redraw.
    ///
    /// # Errors
    ///
    /// Returns [`TickboardError::ChartDesync`] if the swapped arrays would
    /// differ in length.
    pub fn replace_equity_timeline(&mut self, points: &[EquityPoint]) -> Result<()> {
        let labels: Vec<String> = points.iter().map(|p| p.timestamp.clone()).collect();
        let values: Vec<f64> = points.iter().map(|p| p.equity).collect();
        check_parallel("equity", labels.len(), values.len())?;

        self.equity = EquityTimeline { labels, values };
        self.surface.redraw_equity(&self.equity);
        info!(points = self.equity.labels.len(), "Replaced equity timeline");

        Ok(())
    }

    /// Passes the raw backtest output through to the surface's output panel.
    pub fn show_backtest_output(&mut self, raw: &str) {
        self.surface.show_backtest_output(raw);
    }

    /// Passes the one-line backtest summary through to the surface.
    pub fn show_backtest_summary(&mut self, line: &str) {
        self.surface.show_backtest_summary(line);
    }
}

/// Label and value arrays backing one chart must stay the same length.
fn check_parallel(chart: &str, labels: usize, values: usize) -> Result<()> {
    if labels != values {
        return Err(TickboardError::ChartDesync(format!(
            "{chart} chart has {labels} labels but {values} values"
        )));
    }
    Ok(())
}
