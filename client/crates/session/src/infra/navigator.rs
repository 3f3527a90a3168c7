//! History Navigator
//!
//! Records navigations instead of driving a browser. Used by the console
//! host and by tests to observe redirects.

use std::sync::{Mutex, PoisonError};

use crate::domain::repository::Navigator;

/// How a navigation was performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum NavigationKind {
    #[display("replace")]
    Replace,
    #[display("hard")]
    Hard,
}

/// One recorded navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub kind: NavigationKind,
    pub path: String,
}

/// Navigator that keeps a history of every navigation
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Navigation>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent navigation target
    pub fn current(&self) -> Option<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|nav| nav.path.clone())
    }

    pub fn count(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn history(&self) -> Vec<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, kind: NavigationKind, path: &str) {
        tracing::info!(kind = %kind, to = %path, "Navigate");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Navigation {
                kind,
                path: path.to_string(),
            });
    }
}

impl Navigator for HistoryNavigator {
    fn replace(&self, path: &str) {
        self.record(NavigationKind::Replace, path);
    }

    fn hard_navigate(&self, path: &str) {
        self.record(NavigationKind::Hard, path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_history() {
        let nav = HistoryNavigator::new();
        assert_eq!(nav.current(), None);

        nav.replace("/dashboard");
        nav.hard_navigate("/login");

        assert_eq!(nav.count(), 2);
        assert_eq!(nav.current().as_deref(), Some("/login"));
        assert_eq!(nav.history()[0].kind, NavigationKind::Replace);
        assert_eq!(nav.history()[1].kind, NavigationKind::Hard);
    }
}
