//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::TimedOut => ErrorKind::Network,
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted => ErrorKind::Network,
            _ => ErrorKind::Storage,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

impl From<std::string::FromUtf8Error> for AppError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        AppError::invalid_input("Invalid UTF-8 string").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::new(
                ErrorKind::BadGateway,
                format!("Unexpected response body: {}", err),
            )
            .with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// reqwest conversions (feature-gated)
// ============================================================================

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            let kind = ErrorKind::from_status(status.as_u16());
            return AppError::new(kind, format!("Identity service returned {}", status))
                .with_source(err);
        }

        if err.is_timeout() || err.is_connect() || err.is_request() {
            AppError::network("Identity service is unreachable")
                .with_action("Check your connection and try again")
                .with_source(err)
        } else if err.is_decode() {
            AppError::new(ErrorKind::BadGateway, "Malformed response from identity service")
                .with_source(err)
        } else {
            AppError::internal("HTTP client error").with_source(err)
        }
    }
}
