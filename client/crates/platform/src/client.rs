//! HTTP client utilities
//!
//! Construction of the shared `reqwest` client and helpers for
//! bearer credentials and endpoint URLs.

use std::time::Duration;

use http::HeaderValue;
use http::header::InvalidHeaderValue;

/// Configuration for the outbound HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the remote API (e.g. `http://localhost:8000/api`)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(3),
            user_agent: concat!("hr-console/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Build the shared HTTP client
pub fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.as_str())
        .build()
}

/// Build an `Authorization: Bearer <token>` header value
///
/// The value is marked sensitive so it is redacted from `Debug` output.
pub fn bearer_header(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Join a base URL and an endpoint path with exactly one `/`
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
