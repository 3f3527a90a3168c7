//! Session Token Value Object
//!
//! Opaque credential issued by the identity service. The value never appears
//! in `Debug` output or logs; use [`SessionToken::fingerprint`] to refer to it.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use platform::crypto::{constant_time_eq, fingerprint};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Maximum accepted token length
const TOKEN_MAX_LENGTH: usize = 8192;

/// Session token
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token, rejecting values that cannot travel in a header or cookie
    pub fn new(token: impl Into<String>) -> AppResult<Self> {
        let token = token.into();
        let trimmed = token.trim();

        if trimmed.is_empty() {
            return Err(AppError::unauthorized("Session token is empty"));
        }
        if trimmed.len() > TOKEN_MAX_LENGTH {
            return Err(AppError::unauthorized("Session token is too long"));
        }
        if !trimmed
            .bytes()
            .all(|b| b.is_ascii_graphic() && b != b';' && b != b',' && b != b'"' && b != b'\\')
        {
            return Err(AppError::unauthorized("Session token is malformed"));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Log-safe identifier for this token
    pub fn fingerprint(&self) -> String {
        fingerprint(self.0.as_bytes())
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl Eq for SessionToken {}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({})", self.fingerprint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_token_trimmed() {
        let token = SessionToken::new("  abc.def.ghi\n").unwrap();
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    #[test]
    fn test_token_rejects_malformed() {
        assert_eq!(SessionToken::new("").unwrap_err().kind(), ErrorKind::Unauthorized);
        assert!(SessionToken::new("has space").is_err());
        assert!(SessionToken::new("semi;colon").is_err());
        assert!(SessionToken::new("x".repeat(TOKEN_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = SessionToken::new("super-secret-jwt").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("super-secret-jwt"));
        assert!(debug.contains(&token.fingerprint()));
    }

    #[test]
    fn test_equality() {
        let a = SessionToken::new("t1").unwrap();
        assert_eq!(a, SessionToken::new("t1").unwrap());
        assert_ne!(a, SessionToken::new("t2").unwrap());
    }
}
