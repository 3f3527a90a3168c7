//! Credentials Entity
//!
//! Request bodies for the login and registration exchanges.

use serde::Serialize;
use zeroize::Zeroizing;

use crate::domain::value_object::email::Email;
use kernel::error::app_error::{AppError, AppResult};

/// Maximum name length accepted by the registration form
const NAME_MAX_LENGTH: usize = 100;

/// Login credentials
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: Email,
    #[serde(serialize_with = "serialize_secret")]
    pub password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(email: impl AsRef<str>, password: impl Into<String>) -> AppResult<Self> {
        let email = Email::new(email)?;
        let password = Zeroizing::new(password.into());
        if password.is_empty() {
            return Err(AppError::invalid_input("Password cannot be empty"));
        }
        Ok(Self { email, password })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration request
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub email: Email,
    #[serde(serialize_with = "serialize_secret")]
    pub password: Zeroizing<String>,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterInput {
    pub fn new(
        email: impl AsRef<str>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> AppResult<Self> {
        let Credentials { email, password } = Credentials::new(email, password)?;
        let first_name = validate_name("First name", first_name.into())?;
        let last_name = validate_name("Last name", last_name.into())?;
        Ok(Self {
            email,
            password,
            first_name,
            last_name,
        })
    }
}

impl std::fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

fn validate_name(field: &'static str, value: String) -> AppResult<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::invalid_input(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > NAME_MAX_LENGTH {
        return Err(AppError::invalid_input(format!(
            "{} must be at most {} characters",
            field, NAME_MAX_LENGTH
        )));
    }
    Ok(value)
}

fn serialize_secret<S>(secret: &Zeroizing<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(secret.as_str())
}
