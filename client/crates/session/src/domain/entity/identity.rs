//! Identity Entity
//!
//! The authenticated user as held in memory by the session context.
//! Never persisted; re-derived from the stored token on every mount.

use chrono::{DateTime, Utc};

use crate::domain::entity::user_info::{AuthGrant, UserInfo};
use crate::domain::value_object::{
    email::Email, permissions::Permissions, session_token::SessionToken, user_id::UserId,
    user_role::UserRole,
};
use kernel::error::app_error::AppResult;

/// Resolved identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Backend user ID (absent when built from a login grant)
    pub user_id: Option<UserId>,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    /// Token this identity was resolved from
    pub token: SessionToken,
    pub resolved_at: DateTime<Utc>,
}

impl Identity {
    /// Build from a login/register grant
    pub fn from_grant(grant: AuthGrant) -> AppResult<Self> {
        let token = SessionToken::new(grant.token.as_str())?;
        Ok(Self {
            user_id: None,
            email: grant.email,
            first_name: grant.first_name,
            last_name: grant.last_name,
            role: grant.role,
            token,
            resolved_at: Utc::now(),
        })
    }

    /// Build from a `who am I` response for the token it was requested with
    pub fn from_user_info(info: UserInfo, token: SessionToken) -> Self {
        Self {
            user_id: Some(info.id),
            email: info.email,
            first_name: info.first_name,
            last_name: info.last_name,
            role: info.role,
            token,
            resolved_at: Utc::now(),
        }
    }

    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.to_string()
        } else {
            name.to_string()
        }
    }

    #[inline]
    pub fn permissions(&self) -> Permissions {
        self.role.permissions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(token: &str) -> AuthGrant {
        AuthGrant {
            token: token.to_string(),
            email: Email::from_trusted("a@x.com"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: UserRole::Manager,
        }
    }

    #[test]
    fn test_from_grant() {
        let identity = Identity::from_grant(grant("tok-1")).unwrap();
        assert_eq!(identity.token.as_str(), "tok-1");
        assert_eq!(identity.user_id, None);
        assert_eq!(identity.display_name(), "Ada Lovelace");
        assert!(identity.permissions().can_manage_team);
    }

    #[test]
    fn test_from_grant_rejects_empty_token() {
        assert!(Identity::from_grant(grant("")).is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut identity = Identity::from_grant(grant("tok")).unwrap();
        identity.first_name.clear();
        identity.last_name = "  ".to_string();
        assert_eq!(identity.display_name(), "a@x.com");
    }
}
