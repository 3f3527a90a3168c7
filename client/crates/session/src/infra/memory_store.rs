//! In-memory Session Store

use std::sync::{Mutex, PoisonError};

use crate::domain::repository::SessionStore;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::SessionResult;

/// Process-local token storage
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    token: Mutex<Option<SessionToken>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `token`
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }

    /// Whether a token is currently stored
    pub fn has_token(&self) -> bool {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self) -> SessionResult<Option<SessionToken>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set(&self, token: &SessionToken) -> SessionResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn remove(&self) -> SessionResult<()> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Ok(())
    }
}
