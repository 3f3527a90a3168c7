//! User Info Entity
//!
//! Payloads returned by the identity service for an authenticated account.

use serde::{Deserialize, Deserializer};

use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};

/// `GET /test/user-info` response
///
/// Unknown fields are ignored so the backend can grow its payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: UserId,
    pub email: Email,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    pub role: UserRole,
}

/// `POST /auth/login` and `POST /auth/register` response
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthGrant {
    pub token: String,
    pub email: Email,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    pub role: UserRole,
}

/// Names are optional on the backend; a missing or `null` name reads as empty
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// トークン本体は出力しない
impl std::fmt::Debug for AuthGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGrant")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role", &self.role)
            .finish()
    }
}
