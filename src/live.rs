//! Live tick stream: connection lifecycle and per-message chart appends.
//!
//! The controller owns the single live-connection slot. `start` opens the
//! WebSocket and spawns one reader task; each inbound message is handled to
//! completion before the next is read, so appends land on the chart strictly
//! in delivery order. `stop` signals the reader, closes the socket, and
//! waits until no further append can occur.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use tungstenite::Message;
use url::Url;

use crate::Result;
use crate::TickboardError;
use crate::alert::AlertSink;
use crate::chart::SharedChartState;
use crate::models::SessionParams;
use crate::models::live::LiveMessage;

/// A live WebSocket connection to the visualization server.
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens and closes live sessions, enforcing the single-session slot.
pub struct LiveStreamController {
    ws_url: String,
    alerts: Arc<dyn AlertSink>,
    active: Arc<AtomicBool>,
}

impl LiveStreamController {
    #[must_use]
    pub fn new(ws_url: impl Into<String>, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            ws_url: ws_url.into(),
            alerts,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Opens the live connection and starts appending ticks to the price
    /// timeline.
    ///
    /// All parameters are carried in the connection URL; the client sends
    /// nothing after the handshake. The tick-speed hint is a fixed policy of
    /// the data source (see [`crate::models::DataSource::speed_ms`]).
    ///
    /// # Errors
    ///
    /// Returns [`TickboardError::SessionActive`] if a session is already
    /// open; stop it before starting another. Connection failures surface
    /// as [`TickboardError::WebSocket`].
    pub async fn start(
        &self,
        params: &SessionParams,
        charts: SharedChartState,
    ) -> Result<StreamSession> {
        if self.active.swap(true, Ordering::SeqCst) {
            return Err(TickboardError::SessionActive);
        }

        let url = match self.stream_url(params) {
            Ok(url) => url,
            Err(e) => {
                self.active.store(false, Ordering::SeqCst);
                return Err(e);
            }
        };

        info!(symbol = %params.symbol, url = %url, "Connecting to live stream");
        let (stream, _) = match connect_async(url.as_str()).await {
            Ok(pair) => pair,
            Err(e) => {
                self.active.store(false, Ordering::SeqCst);
                return Err(e.into());
            }
        };
        info!("Live stream connected");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let active = self.active.clone();
        let alerts = self.alerts.clone();
        let task = tokio::spawn(async move {
            read_loop(stream, shutdown_rx, charts, alerts).await;
            active.store(false, Ordering::SeqCst);
            info!("Live stream closed");
        });

        Ok(StreamSession {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Stops a session. Provided for symmetry with [`start`](Self::start);
    /// equivalent to [`StreamSession::stop`].
    pub async fn stop(&self, session: &mut StreamSession) {
        session.stop().await;
    }

    fn stream_url(&self, params: &SessionParams) -> Result<Url> {
        let mut url = Url::parse(&self.ws_url)?;
        url.set_path("/ws/live");
        url.query_pairs_mut()
            .append_pair("symbol", &params.symbol)
            .append_pair("strategy", params.strategy.as_str())
            .append_pair("fast", &params.fast.to_string())
            .append_pair("slow", &params.slow.to_string())
            .append_pair("rsi_period", &params.rsi_period.to_string())
            .append_pair("source", params.source.as_str())
            .append_pair("speed_ms", &params.source.speed_ms().to_string());
        Ok(url)
    }
}

/// Handle for one open live connection.
///
/// Dropping the handle signals the reader to wind down; call
/// [`stop`](Self::stop) to wait until it has.
#[derive(Debug)]
pub struct StreamSession {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl StreamSession {
    /// Closes the connection and waits for the reader task to finish.
    ///
    /// No append occurs after this returns. Calling `stop` on an
    /// already-stopped session is a no-op.
    pub async fn stop(&mut self) {
        let Some(shutdown) = self.shutdown.take() else {
            debug!("Live session already stopped");
            return;
        };
        let _ = shutdown.send(());
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!("Live session stopped");
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Reads messages until shutdown, a transport error, or the server closes.
///
/// Single-flight: each message is fully handled before the next is read.
async fn read_loop(
    mut stream: WsStream,
    mut shutdown: oneshot::Receiver<()>,
    charts: SharedChartState,
    alerts: Arc<dyn AlertSink>,
) {
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                if let Err(e) = stream.close(None).await {
                    debug!("Error closing live stream: {e}");
                }
                return;
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_text(&text, &charts, &alerts).await;
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Live stream closed by server");
                        return;
                    }
                    Some(Ok(_)) => {} // Binary/Ping/Pong frames
                    Some(Err(e)) => {
                        warn!("Live stream error: {e}");
                        return;
                    }
                    None => {
                        info!("Live stream ended");
                        return;
                    }
                }
            }
        }
    }
}

/// Handles one inbound text frame.
///
/// A server-reported error is surfaced and discarded — the connection stays
/// open and the chart is untouched. A tick appends exactly one candle.
async fn handle_text(text: &str, charts: &SharedChartState, alerts: &Arc<dyn AlertSink>) {
    match LiveMessage::parse(text) {
        Ok(LiveMessage::Error(message)) => {
            alerts.alert("live stream", &message);
        }
        Ok(LiveMessage::Tick(tick)) => {
            if let Some(action) = &tick.action {
                info!(t = %tick.t, action, "Position action");
            }
            let mut state = charts.lock().await;
            if let Err(e) = state.append_candle(&tick.t, tick.c, tick.signal) {
                alerts.alert("live stream", &e.to_string());
            }
        }
        Err(e) => {
            alerts.alert("live stream", &e.to_string());
        }
    }
}
