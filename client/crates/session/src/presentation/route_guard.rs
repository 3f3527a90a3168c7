//! Route Guard
//!
//! Gates a page on the settled session state. While the session is still
//! resolving the guard shows a placeholder and never navigates. Once settled
//! it either renders the page or issues exactly one redirect, after which it
//! keeps showing the placeholder.
//!
//! The decision reads the resolved identity only; a stored but unverified
//! token never counts as signed in.

use std::sync::{Arc, OnceLock};

use tokio::sync::watch;

use crate::application::config::SessionConfig;
use crate::domain::repository::Navigator;
use crate::domain::state::SessionState;
use crate::presentation::routes::{Route, RoutePolicy};

/// Outcome of evaluating a policy against a state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not settled yet
    Wait,
    Allow,
    Redirect(String),
}

/// What the page should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView {
    /// Placeholder while the session resolves
    Loading,
    /// Placeholder after a redirect was issued
    Redirecting { to: String },
    /// Render the page
    Render,
}

impl GuardView {
    #[inline]
    pub fn renders(&self) -> bool {
        matches!(self, GuardView::Render)
    }
}

/// ガード判定（副作用なし）
///
/// ## Arguments
/// * `policy` - ページのアクセス方針
/// * `state` - 現在のセッション状態
/// * `login_path` - 公開側の入口
/// * `home_path` - 保護側の入口
pub fn decide(
    policy: RoutePolicy,
    state: &SessionState,
    login_path: &str,
    home_path: &str,
) -> GuardDecision {
    if state.is_loading() {
        return GuardDecision::Wait;
    }

    let authenticated = state.is_authenticated();
    match policy {
        RoutePolicy::Protected if !authenticated => GuardDecision::Redirect(login_path.to_string()),
        RoutePolicy::Public if authenticated => GuardDecision::Redirect(home_path.to_string()),
        RoutePolicy::Entry if authenticated => GuardDecision::Redirect(home_path.to_string()),
        RoutePolicy::Entry => GuardDecision::Redirect(login_path.to_string()),
        _ => GuardDecision::Allow,
    }
}

/// Guard for one page instance
pub struct RouteGuard<N>
where
    N: Navigator + 'static,
{
    policy: RoutePolicy,
    navigator: Arc<N>,
    login_path: String,
    home_path: String,
    redirected: OnceLock<String>,
}

impl<N> RouteGuard<N>
where
    N: Navigator + 'static,
{
    pub fn new(policy: RoutePolicy, navigator: Arc<N>, config: &SessionConfig) -> Self {
        Self {
            policy,
            navigator,
            login_path: config.login_path.clone(),
            home_path: config.home_path.clone(),
            redirected: OnceLock::new(),
        }
    }

    /// Guard for a known route
    pub fn for_route(route: Route, navigator: Arc<N>, config: &SessionConfig) -> Self {
        Self::new(route.policy(), navigator, config)
    }

    /// Guard for an arbitrary path (unknown paths are protected)
    pub fn for_path(path: &str, navigator: Arc<N>, config: &SessionConfig) -> Self {
        Self::new(Route::policy_for(path), navigator, config)
    }

    pub fn policy(&self) -> RoutePolicy {
        self.policy
    }

    /// Evaluate against `state`, navigating at most once per guard
    pub fn evaluate(&self, state: &SessionState) -> GuardView {
        if let Some(to) = self.redirected.get() {
            return GuardView::Redirecting { to: to.clone() };
        }

        match decide(self.policy, state, &self.login_path, &self.home_path) {
            GuardDecision::Wait => GuardView::Loading,
            GuardDecision::Allow => GuardView::Render,
            GuardDecision::Redirect(to) => {
                let mut fired = false;
                let target = self.redirected.get_or_init(|| {
                    fired = true;
                    to
                });
                if fired {
                    tracing::debug!(policy = %self.policy, to = %target, "Guard redirect");
                    self.navigator.replace(target);
                }
                GuardView::Redirecting {
                    to: target.clone(),
                }
            }
        }
    }

    /// Wait until the session settles, then evaluate once
    ///
    /// If the session context is dropped before settling, the last observed
    /// state is evaluated (normally yielding [`GuardView::Loading`]).
    pub async fn resolve(&self, receiver: &mut watch::Receiver<SessionState>) -> GuardView {
        let settled = receiver
            .wait_for(SessionState::is_settled)
            .await
            .map(|state| state.clone());
        let state = match settled {
            Ok(state) => state,
            Err(_) => receiver.borrow().clone(),
        };
        self.evaluate(&state)
    }
}
