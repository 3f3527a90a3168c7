//! Session (Client-side Authentication) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session state machine, entities, value objects, repository traits
//! - `application/` - Session context and configuration
//! - `infra/` - Token stores, HTTP identity client, navigator
//! - `presentation/` - Route table and route guard
//!
//! ## Lifecycle
//! `Unresolved → Resolving → Resolved | Anonymous`
//! - Mount reads the stored token once and resolves it via the identity service
//! - Login persists the token and resolves the session directly
//! - Logout purges the token; it never contacts the identity service
//!
//! ## Security Model
//! - A resolved identity exists only while the store holds its token
//! - Pages are gated on the resolved identity, never on raw token presence
//! - Only a confirmed 401 tears the session down; transient failures are retried
//! - Tokens are zeroized on drop and logged by fingerprint only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SessionConfig;
pub use application::session_context::SessionContext;
pub use domain::state::{SessionEvent, SessionState};
pub use error::{SessionError, SessionResult};
pub use infra::{CookieJarStore, HistoryNavigator, HttpIdentityClient, InMemorySessionStore};
pub use presentation::{GuardView, Route, RouteGuard, RoutePolicy};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
