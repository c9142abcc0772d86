//! User-visible error notifications.
//!
//! Failures surfaced to the user name the failing operation and carry the
//! server-supplied detail text, truncated to a bounded length so a raw
//! payload can never flood the display.

use tracing::error;

/// Longest detail text or raw-body excerpt surfaced in an alert.
pub const DETAIL_EXCERPT_LEN: usize = 200;

/// Longest raw-body excerpt kept from an unparseable backtest response.
pub const OUTPUT_EXCERPT_LEN: usize = 500;

/// Sink for blocking user-visible notifications.
pub trait AlertSink: Send + Sync {
    /// Surfaces `message` to the user, attributed to `operation`.
    fn alert(&self, operation: &str, message: &str);
}

/// Production sink that reports alerts as `tracing` error events.
#[derive(Debug, Default)]
pub struct TracingAlerts;

impl AlertSink for TracingAlerts {
    fn alert(&self, operation: &str, message: &str) {
        error!(operation, "{}", excerpt(message, DETAIL_EXCERPT_LEN));
    }
}

/// Returns at most `max` characters of `body`, respecting char boundaries.
pub fn excerpt(body: &str, max: usize) -> String {
    body.chars().take(max).collect()
}
