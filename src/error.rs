//! Crate-level error types.
//!
//! [`TickboardError`] unifies every error source (configuration, HTTP,
//! WebSocket, JSON, server-reported failures, chart invariant violations)
//! behind a single enum so callers can match on the variant they care about
//! while still using the `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TickboardError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TickboardError {
    /// A configuration value could not be read or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// An outbound HTTP request failed at the transport level.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A WebSocket operation (connect, read, close) failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An endpoint URL could not be parsed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The server reported a failure in an otherwise well-formed payload.
    #[error("{0}")]
    Api(String),

    /// A response body could not be parsed; carries a bounded excerpt of the
    /// raw payload.
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// A chart mutation would have left the label and value arrays with
    /// different lengths. Indicates a client-side bug; the mutation is
    /// aborted rather than applied.
    #[error("chart desync: {0}")]
    ChartDesync(String),

    /// `start` was called while a live session was already open.
    #[error("a live session is already active; stop it before starting another")]
    SessionActive,
}
