//! Session Error Types
//!
//! This module provides session-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::cookie::CookieJarError;
use thiserror::Error;

/// Session-specific result type alias
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific error variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Login or registration exchange rejected the credentials
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration refused (e.g. email already in use)
    #[error("Registration rejected: {0}")]
    RegistrationRejected(String),

    /// Authenticated call rejected with 401, or no token stored
    #[error("Session is not authorized")]
    Unauthorized,

    /// Authenticated, but the role may not access the resource
    #[error("Access denied for this role")]
    Forbidden,

    /// Identity service unreachable or timed out
    #[error("Network failure: {0}")]
    Network(String),

    /// 5xx from the identity service
    #[error("Identity service error (status {status})")]
    Server { status: u16 },

    /// Any other non-success status
    #[error("Unexpected response status {status}")]
    UnexpectedStatus { status: u16 },

    /// Response body did not match the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// Session store I/O failed
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Caller input rejected before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Classify a non-success status from an authenticated call
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => SessionError::Unauthorized,
            403 => SessionError::Forbidden,
            500..=599 => SessionError::Server { status },
            _ => SessionError::UnexpectedStatus { status },
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidCredentials | SessionError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            SessionError::RegistrationRejected(_) => ErrorKind::Conflict,
            SessionError::Forbidden => ErrorKind::Forbidden,
            SessionError::Network(_) => ErrorKind::Network,
            SessionError::Server { status } | SessionError::UnexpectedStatus { status } => {
                ErrorKind::from_status(*status)
            }
            SessionError::Decode(_) => ErrorKind::BadGateway,
            SessionError::Storage(_) => ErrorKind::Storage,
            SessionError::InvalidInput(_) => ErrorKind::BadRequest,
            SessionError::Config(_) | SessionError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether this error must tear the session down
    ///
    /// Only a confirmed 401 on an authenticated call qualifies; rejected
    /// credentials, 403 and transient failures leave the session intact.
    #[inline]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, SessionError::Unauthorized)
    }

    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            SessionError::Network(_) => true,
            SessionError::Server { status } | SessionError::UnexpectedStatus { status } => {
                ErrorKind::from_status(*status).is_transient()
            }
            _ => false,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            SessionError::InvalidCredentials => err.with_action("Check your email and password"),
            SessionError::Unauthorized => err.with_action("Please sign in again"),
            SessionError::Forbidden => err.with_action("Ask an administrator for access"),
            SessionError::Network(_) | SessionError::Server { .. } => {
                err.with_action("Check your connection and try again")
            }
            SessionError::RegistrationRejected(_) => {
                err.with_action("Use a different email or sign in instead")
            }
            SessionError::Config(_) => err.with_action("Check the HR_* environment variables"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            SessionError::Storage(msg) => {
                tracing::error!(message = %msg, "Session storage error");
            }
            SessionError::Internal(msg) => {
                tracing::error!(message = %msg, "Session internal error");
            }
            SessionError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            SessionError::Unauthorized => {
                tracing::warn!("Authenticated call rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Session error");
            }
        }
    }
}

impl From<AppError> for SessionError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => SessionError::InvalidInput(err.message().to_string()),
            ErrorKind::Unauthorized => SessionError::Unauthorized,
            ErrorKind::Network => SessionError::Network(err.message().to_string()),
            ErrorKind::Storage => SessionError::Storage(err.message().to_string()),
            ErrorKind::BadGateway => SessionError::Decode(err.message().to_string()),
            _ => SessionError::Internal(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SessionError::from_status(status.as_u16()),
            None => AppError::from(err).into(),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Decode(err.to_string())
    }
}

impl From<CookieJarError> for SessionError {
    fn from(err: CookieJarError) -> Self {
        SessionError::Storage(err.to_string())
    }
}
