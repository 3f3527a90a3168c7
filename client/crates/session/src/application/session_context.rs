//! Session Context
//!
//! Owns the session lifecycle for one application instance: mount-time
//! identity resolution, login, registration, logout, and teardown when an
//! authenticated call is rejected.
//!
//! State is published on a `tokio::sync::watch` channel. Every transition
//! goes through [`SessionState::apply`], and the stored token is written
//! before any state that depends on it is published, so a resolved identity
//! never outlives the token it was resolved from.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::application::config::SessionConfig;
use crate::domain::entity::{
    access::{PermissionReport, RoleDashboard},
    credentials::{Credentials, RegisterInput},
    identity::Identity,
    user_info::AuthGrant,
};
use crate::domain::repository::{IdentityGateway, Navigator, SessionStore};
use crate::domain::state::{SessionEvent, SessionState};
use crate::domain::value_object::{session_token::SessionToken, user_role::UserRole};
use crate::error::{SessionError, SessionResult};

/// Session context
///
/// Construct one per application instance and share it behind an `Arc`.
/// Dropping it closes the state channel; subscribers observe the close.
pub struct SessionContext<S, G, N>
where
    S: SessionStore + 'static,
    G: IdentityGateway + Send + Sync + 'static,
    N: Navigator + 'static,
{
    store: Arc<S>,
    gateway: Arc<G>,
    navigator: Arc<N>,
    config: Arc<SessionConfig>,
    state: watch::Sender<SessionState>,
}

impl<S, G, N> SessionContext<S, G, N>
where
    S: SessionStore + 'static,
    G: IdentityGateway + Send + Sync + 'static,
    N: Navigator + 'static,
{
    pub fn new(store: Arc<S>, gateway: Arc<G>, navigator: Arc<N>, config: Arc<SessionConfig>) -> Self {
        Self {
            store,
            gateway,
            navigator,
            config,
            state: watch::Sender::new(SessionState::Unresolved),
        }
    }

    // ========================================================================
    // Observation
    // ========================================================================

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    pub fn is_mounted(&self) -> bool {
        self.state.borrow().is_mounted()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Read the stored token and resolve it into an identity
    ///
    /// Only the first call does anything. A token that fails to resolve, for
    /// any reason, is purged and the session settles as anonymous.
    pub async fn mount(&self) {
        let token = self.read_token();
        let event = match token {
            Some(_) => SessionEvent::MountedWithToken,
            None => SessionEvent::MountedWithoutToken,
        };

        let claimed = self.state.send_if_modified(|state| {
            if matches!(state, SessionState::Unresolved) {
                *state = std::mem::take(state).apply(event);
                true
            } else {
                false
            }
        });
        if !claimed {
            tracing::debug!("Session already mounted");
            return;
        }

        let Some(token) = token else {
            tracing::debug!("No stored session token");
            return;
        };

        tracing::debug!(token = %token.fingerprint(), "Resolving stored session token");

        match self.gateway.who_am_i().await {
            Ok(info) => {
                let identity = Identity::from_user_info(info, token.clone());
                let email = identity.email.to_string();
                let applied = self.state.send_if_modified(|state| {
                    if matches!(state, SessionState::Resolving) && self.store_holds(&token) {
                        *state = std::mem::take(state).apply(SessionEvent::Resolved(identity));
                        true
                    } else {
                        false
                    }
                });
                if applied {
                    tracing::info!(email = %email, "Session restored");
                } else {
                    tracing::debug!(
                        token = %token.fingerprint(),
                        "Discarding stale identity resolution"
                    );
                }
            }
            Err(err) => {
                err.log();
                let applied = self.state.send_if_modified(|state| {
                    if matches!(state, SessionState::Resolving) {
                        let _ = self.purge_token();
                        *state = std::mem::take(state).apply(SessionEvent::ResolutionFailed);
                        true
                    } else {
                        false
                    }
                });
                if applied {
                    tracing::info!(
                        token = %token.fingerprint(),
                        error = %err,
                        "Stored session token rejected, signed out"
                    );
                }
            }
        }
    }

    /// Sign in with email and password
    ///
    /// On success the token is persisted and the session is resolved without a
    /// separate identity lookup. On failure the state is left unchanged.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<Identity> {
        let credentials = Credentials::new(email, password)?;
        let grant = self
            .gateway
            .login(&credentials)
            .await
            .inspect_err(SessionError::log)?;
        self.establish(grant)
    }

    /// Create an account and sign in
    pub async fn register(&self, input: RegisterInput) -> SessionResult<Identity> {
        let grant = self
            .gateway
            .register(&input)
            .await
            .inspect_err(SessionError::log)?;
        self.establish(grant)
    }

    /// Sign out
    ///
    /// Purges the stored token and settles as anonymous. Never calls the
    /// identity service, and calling it again is harmless.
    ///
    /// If the token cannot be removed from storage the session is left as it
    /// was and the storage error is returned, since the next mount would
    /// restore it.
    pub fn logout(&self) -> SessionResult<()> {
        self.purge_token()?;
        if self.transition(SessionEvent::LoggedOut) {
            tracing::info!("Signed out");
        }
        Ok(())
    }

    // ========================================================================
    // Authenticated calls
    // ========================================================================

    /// Re-fetch the identity for the current token
    ///
    /// The result replaces the resolved identity only while that identity and
    /// the stored token still match the token the lookup was made with.
    pub async fn refresh_identity(&self) -> SessionResult<Identity> {
        let token = self
            .intercept(async { self.store.get()?.ok_or(SessionError::Unauthorized) })
            .await?;
        let info = self.intercept(self.gateway.who_am_i()).await?;
        let identity = Identity::from_user_info(info, token.clone());

        let applied = self.state.send_if_modified(|state| {
            let current = state.identity().is_some_and(|resolved| resolved.token == token);
            if current && self.store_holds(&token) {
                *state = std::mem::take(state).apply(SessionEvent::Refreshed(identity.clone()));
                true
            } else {
                false
            }
        });
        if applied {
            return Ok(identity);
        }

        tracing::debug!(token = %token.fingerprint(), "Discarding stale identity refresh");
        self.identity().ok_or(SessionError::Unauthorized)
    }

    pub async fn protected_message(&self) -> SessionResult<String> {
        self.intercept(self.gateway.protected_message()).await
    }

    pub async fn check_permissions(&self) -> SessionResult<PermissionReport> {
        self.intercept(self.gateway.check_permissions()).await
    }

    /// Open a role dashboard. A 403 is returned to the caller and the session
    /// is kept.
    pub async fn role_dashboard(&self, role: UserRole) -> SessionResult<RoleDashboard> {
        self.intercept(self.gateway.role_dashboard(role)).await
    }

    /// Run an authenticated call, tearing the session down on a confirmed 401
    ///
    /// A rejection only counts against the token the call was made with. If a
    /// login replaced the token while the call was in flight, the new session
    /// is kept.
    async fn intercept<T, F>(&self, call: F) -> SessionResult<T>
    where
        F: Future<Output = SessionResult<T>>,
    {
        let sent = self.read_token();
        match call.await {
            Err(err) if err.is_auth_failure() => {
                err.log();
                let replaced = match &sent {
                    Some(token) => !self.store_holds(token),
                    None => false,
                };
                if replaced {
                    tracing::debug!("Ignoring rejection of a replaced session token");
                } else {
                    self.teardown();
                }
                Err(err)
            }
            other => other,
        }
    }

    fn teardown(&self) {
        // 削除失敗はログのみ（トークンはサーバー側で失効済み）
        let _ = self.purge_token();
        self.transition(SessionEvent::Unauthorized);
        tracing::warn!(to = %self.config.login_path, "Session rejected, returning to sign-in");
        self.navigator.hard_navigate(&self.config.login_path);
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn establish(&self, grant: AuthGrant) -> SessionResult<Identity> {
        let identity = Identity::from_grant(grant).map_err(|e| {
            SessionError::Decode(format!("Identity service issued an unusable token: {}", e.message()))
        })?;

        self.store.set(&identity.token).inspect_err(SessionError::log)?;
        self.transition(SessionEvent::LoggedIn(identity.clone()));

        tracing::info!(
            email = %identity.email,
            role = %identity.role,
            token = %identity.token.fingerprint(),
            "Signed in"
        );
        Ok(identity)
    }

    /// Apply `event`, notifying subscribers only when the state changes
    fn transition(&self, event: SessionEvent) -> bool {
        self.state.send_if_modified(|state| {
            let next = state.clone().apply(event);
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        })
    }

    /// Stored token, treating storage failures as "no token"
    fn read_token(&self) -> Option<SessionToken> {
        self.store.get().unwrap_or_else(|err| {
            err.log();
            None
        })
    }

    fn store_holds(&self, token: &SessionToken) -> bool {
        self.read_token().is_some_and(|stored| stored == *token)
    }

    /// Remove the stored token, retrying once before giving up
    fn purge_token(&self) -> SessionResult<()> {
        self.store
            .remove()
            .or_else(|err| {
                tracing::debug!(error = %err, "Removing session token failed, retrying");
                self.store.remove()
            })
            .inspect_err(|err| {
                tracing::error!(error = %err, "Session token could not be removed from storage");
            })
    }
}
