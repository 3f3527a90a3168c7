//! Repository Traits
//!
//! Interfaces for token storage, the identity service and navigation.
//! Implementations live in the infrastructure layer.

use crate::domain::entity::{
    access::{PermissionReport, RoleDashboard},
    credentials::{Credentials, RegisterInput},
    user_info::{AuthGrant, UserInfo},
};
use crate::domain::value_object::{session_token::SessionToken, user_role::UserRole};
use crate::error::SessionResult;

/// Persisted session token storage
///
/// Holds at most one token. Reads and writes are plain storage I/O and may be
/// called before any network activity.
pub trait SessionStore: Send + Sync {
    /// Read the stored token
    fn get(&self) -> SessionResult<Option<SessionToken>>;

    /// Store `token`, replacing any previous one
    fn set(&self, token: &SessionToken) -> SessionResult<()>;

    /// Remove the stored token. Removing an absent token is not an error.
    fn remove(&self) -> SessionResult<()>;
}

/// Identity service client
///
/// Authenticated calls attach the stored token themselves; the gateway never
/// writes the session store.
#[trait_variant::make(IdentityGateway: Send)]
pub trait LocalIdentityGateway {
    /// Exchange credentials for a token and profile
    async fn login(&self, credentials: &Credentials) -> SessionResult<AuthGrant>;

    /// Create an account and sign in
    async fn register(&self, input: &RegisterInput) -> SessionResult<AuthGrant>;

    /// Resolve the profile behind the stored token
    async fn who_am_i(&self) -> SessionResult<UserInfo>;

    /// Fetch the protected probe message
    async fn protected_message(&self) -> SessionResult<String>;

    /// Fetch the capability flags of the current role
    async fn check_permissions(&self) -> SessionResult<PermissionReport>;

    /// Fetch a role-specific dashboard
    async fn role_dashboard(&self, role: UserRole) -> SessionResult<RoleDashboard>;
}

/// Page navigation
pub trait Navigator: Send + Sync {
    /// Client-side navigation replacing the current history entry
    fn replace(&self, path: &str);

    /// Full navigation that discards in-memory page state
    fn hard_navigate(&self, path: &str);
}
