//! Live stream message payloads.

use serde::Deserialize;

use crate::TickboardError;
use crate::alert::{DETAIL_EXCERPT_LEN, excerpt};
use crate::models::Signal;

/// One tick from the live stream.
///
/// The full payload also carries `o`/`h`/`l`/`v`; only the fields that drive
/// the chart are extracted, so unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveTick {
    /// ISO-8601 timestamp of the tick.
    pub t: String,
    /// Close price.
    pub c: f64,
    #[serde(default)]
    pub signal: Signal,
    /// Position-aware action (`"BUY"`/`"SELL"`) the server took on this
    /// tick. Logged for diagnostics; chart mutation keys off `signal` alone.
    #[serde(default)]
    pub action: Option<String>,
}

/// A parsed inbound stream message.
#[derive(Debug, Clone)]
pub enum LiveMessage {
    Tick(LiveTick),
    /// Server-reported error; surfaced to the user, connection stays open.
    Error(String),
}

impl LiveMessage {
    /// Parses one inbound text frame.
    ///
    /// Routes on the presence of an `error` field before attempting the tick
    /// shape, so an error payload is never misread as a malformed tick.
    ///
    /// # Errors
    ///
    /// Returns [`TickboardError::MalformedBody`] for non-JSON frames and
    /// [`TickboardError::Json`] for JSON that fits neither shape.
    pub fn parse(text: &str) -> crate::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|_| TickboardError::MalformedBody(excerpt(text, DETAIL_EXCERPT_LEN)))?;

        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return Ok(LiveMessage::Error(message.to_string()));
        }

        Ok(LiveMessage::Tick(serde_json::from_value(value)?))
    }
}
