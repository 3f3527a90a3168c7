//! Session State Machine
//!
//! `Unresolved → Resolving → Resolved | Anonymous`
//!
//! The lifecycle is a single tagged value, so "mounted but not loading and
//! without identity" style contradictions cannot be represented.

use crate::domain::entity::identity::Identity;

/// セッションの状態
///
/// ## Variants
/// * `Unresolved` - マウント前。ストレージはまだ読まれていない
/// * `Resolving` - トークンあり、identity を問い合わせ中
/// * `Resolved` - identity 確定済み
/// * `Anonymous` - 未ログイン（トークンなし、または破棄済み）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unresolved,
    Resolving,
    Resolved(Identity),
    Anonymous,
}

/// 状態遷移を引き起こすイベント
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Mount found no stored token
    MountedWithoutToken,
    /// Mount found a token and started resolving it
    MountedWithToken,
    /// Identity resolution succeeded
    Resolved(Identity),
    /// Identity resolution failed; the token has been purged
    ResolutionFailed,
    /// Login or registration succeeded
    LoggedIn(Identity),
    /// Identity re-fetched for the current session
    Refreshed(Identity),
    LoggedOut,
    /// An authenticated call was rejected with 401
    Unauthorized,
}

impl SessionState {
    /// 状態遷移
    ///
    /// 現在の状態で受理されないイベントは無視され、状態は変わりません。
    ///
    /// ## Examples
    /// ```rust
    /// use session::domain::state::{SessionEvent, SessionState};
    ///
    /// let state = SessionState::Unresolved.apply(SessionEvent::MountedWithoutToken);
    /// assert_eq!(state, SessionState::Anonymous);
    ///
    /// // 二度目のマウントは無視される
    /// let state = state.apply(SessionEvent::MountedWithToken);
    /// assert_eq!(state, SessionState::Anonymous);
    /// ```
    pub fn apply(self, event: SessionEvent) -> SessionState {
        use SessionEvent as E;
        use SessionState as S;

        match (self, event) {
            (S::Unresolved, E::MountedWithoutToken) => S::Anonymous,
            (S::Unresolved, E::MountedWithToken) => S::Resolving,
            (S::Resolving, E::Resolved(identity)) => S::Resolved(identity),
            (S::Resolving, E::ResolutionFailed) => S::Anonymous,
            (_, E::LoggedIn(identity)) => S::Resolved(identity),
            (S::Resolved(_), E::Refreshed(identity)) => S::Resolved(identity),
            (_, E::LoggedOut | E::Unauthorized) => S::Anonymous,
            (state, _) => state,
        }
    }

    /// マウント済みか（ストレージを読んだか）
    #[inline]
    pub fn is_mounted(&self) -> bool {
        !matches!(self, SessionState::Unresolved)
    }

    /// 判定待ちか
    #[inline]
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Unresolved | SessionState::Resolving)
    }

    /// 認証状態が確定したか
    #[inline]
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Resolved(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Resolved(identity) => Some(identity),
            _ => None,
        }
    }
}
