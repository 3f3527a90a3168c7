//! Application Configuration
//!
//! Configuration for the session subsystem.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{SessionError, SessionResult};

/// Re-export cookie and HTTP settings from platform
pub use platform::client::HttpClientConfig;
pub use platform::cookie::CookieConfig;
pub use platform::retry::RetryPolicy;

/// Default identity service base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Session application configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Identity service base URL
    pub api_base_url: String,
    /// Session token cookie
    pub cookie: CookieConfig,
    /// Cookie jar file (None keeps the token in memory only)
    pub cookie_jar_path: Option<PathBuf>,
    /// Public entry (login page)
    pub login_path: String,
    /// Protected entry (dashboard home)
    pub home_path: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Retry policy for idempotent calls
    pub retry: RetryPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cookie: CookieConfig::default(),
            cookie_jar_path: None,
            login_path: "/login".to_string(),
            home_path: "/dashboard".to_string(),
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Load from `HR_*` environment variables, falling back to defaults
    ///
    /// ## Environment
    /// * `HR_API_BASE_URL` - identity service base URL
    /// * `HR_SESSION_COOKIE` - token cookie name
    /// * `HR_COOKIE_JAR` - cookie jar path
    /// * `HR_REQUEST_TIMEOUT_SECS` - request timeout in seconds
    /// * `HR_RETRY_MAX_ATTEMPTS` - attempts per idempotent call
    pub fn from_env() -> SessionResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SessionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("HR_API_BASE_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SessionError::Config(format!(
                    "HR_API_BASE_URL must be an http(s) URL, got {:?}",
                    url
                )));
            }
            config.api_base_url = url;
        }

        if let Some(name) = lookup("HR_SESSION_COOKIE") {
            let name = name.trim();
            if name.is_empty() {
                return Err(SessionError::Config("HR_SESSION_COOKIE is empty".into()));
            }
            config.cookie = CookieConfig::named(name);
        }

        if let Some(path) = lookup("HR_COOKIE_JAR").filter(|p| !p.trim().is_empty()) {
            config.cookie_jar_path = Some(PathBuf::from(path.trim()));
        }

        if let Some(secs) = lookup("HR_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = parse_number("HR_REQUEST_TIMEOUT_SECS", &secs)?;
            config.request_timeout = Duration::from_secs(secs.max(1));
        }

        if let Some(attempts) = lookup("HR_RETRY_MAX_ATTEMPTS") {
            let attempts: u32 = parse_number("HR_RETRY_MAX_ATTEMPTS", &attempts)?;
            config.retry = RetryPolicy {
                max_attempts: attempts.max(1),
                ..config.retry
            };
        }

        Ok(config)
    }

    /// HTTP client settings derived from this config
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            base_url: self.api_base_url.clone(),
            timeout: self.request_timeout,
            ..Default::default()
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> SessionResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| SessionError::Config(format!("{} must be a number, got {:?}", key, raw)))
}
