//! Email Value Object
//!
//! Login identifier for the HR backend. Only the shape is checked here;
//! the identity service decides whether an account exists.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local-part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    ///
    /// Input is NFKC-normalized, trimmed and lowercased so that
    /// full-width input typed into a login form matches the stored account.
    pub fn new(email: impl AsRef<str>) -> AppResult<Self> {
        let email: String = email.as_ref().nfkc().collect::<String>().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::invalid_input("Email cannot be empty"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&email) {
            return Err(AppError::invalid_input("Invalid email format")
                .with_action("Enter an address like name@company.com"));
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH || domain.contains('@') {
            return false;
        }

        if local.chars().any(char::is_whitespace) {
            return false;
        }

        !domain.is_empty()
            && domain.contains('.')
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
            && !domain.starts_with(['.', '-'])
            && !domain.ends_with(['.', '-'])
    }

    /// Wrap a value received from the identity service without re-validating
    pub fn from_trusted(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// レスポンス由来の値は再検証しない
impl<'de> Deserialize<'de> for Email {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_trusted)
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("a@x.com").is_ok());
        assert!(Email::new("hr.admin@company.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("   ").is_err());
        assert!(Email::new("adminexample.com").is_err());
        assert!(Email::new("admin@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("admin@@example.com").is_err());
        assert!(Email::new("admin@example").is_err());
        assert!(Email::new("admin@-example.com").is_err());
        assert!(Email::new("ad min@example.com").is_err());
    }

    #[test]
    fn test_email_normalization() {
        let email = Email::new("  Admin@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "admin@example.com");

        // 全角入力も正規化される
        let email = Email::new("ａｄｍｉｎ＠ｅｘａｍｐｌｅ．ｃｏｍ").unwrap();
        assert_eq!(email.as_str(), "admin@example.com");
    }

    #[test]
    fn test_deserialize_is_trusted() {
        let email: Email = serde_json::from_str("\"Legacy@Host\"").unwrap();
        assert_eq!(email.as_str(), "Legacy@Host");
    }
}
