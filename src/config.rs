//! Application configuration loaded from environment variables.
//!
//! Both endpoints default to the local development server:
//! - `TICKBOARD_API_URL` — HTTP base URL for historical and backtest requests
//! - `TICKBOARD_WS_URL` — WebSocket base URL for the live stream

/// Default HTTP base URL.
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default WebSocket base URL.
const DEFAULT_WS_URL: &str = "ws://localhost:8000";

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
}

/// Endpoint URLs for the visualization server.
#[derive(Debug)]
pub struct ServerConfig {
    pub api_url: String,
    pub ws_url: String,
}

/// Loads the application configuration from environment variables.
///
/// The HTTP base URL defaults to `http://localhost:8000` and can be
/// overridden with `TICKBOARD_API_URL`; the WebSocket base URL defaults to
/// `ws://localhost:8000` and can be overridden with `TICKBOARD_WS_URL`.
///
/// # Errors
///
/// Returns [`TickboardError::Config`](crate::TickboardError::Config) if an
/// override uses a scheme the corresponding client cannot speak.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let api_url = non_empty_var("TICKBOARD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let ws_url = non_empty_var("TICKBOARD_WS_URL").unwrap_or_else(|| DEFAULT_WS_URL.to_string());

    if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
        return Err(crate::TickboardError::Config(format!(
            "TICKBOARD_API_URL must start with http:// or https://, got {api_url}"
        )));
    }
    if !ws_url.starts_with("ws://") && !ws_url.starts_with("wss://") {
        return Err(crate::TickboardError::Config(format!(
            "TICKBOARD_WS_URL must start with ws:// or wss://, got {ws_url}"
        )));
    }

    Ok(AppConfig {
        server: ServerConfig { api_url, ws_url },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
