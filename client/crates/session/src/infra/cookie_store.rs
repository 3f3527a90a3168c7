//! Cookie Jar Session Store
//!
//! Persists the token as one cookie in a jar file shared with other
//! cookies. Unrelated cookies are preserved on every write.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use platform::cookie::{CookieConfig, load_jar, save_jar};

use crate::domain::repository::SessionStore;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{SessionError, SessionResult};

/// File-backed token storage
#[derive(Debug)]
pub struct CookieJarStore {
    path: PathBuf,
    cookie: CookieConfig,
    // jar の read-modify-write を直列化する
    lock: Mutex<()>,
}

impl CookieJarStore {
    pub fn new(path: impl Into<PathBuf>, cookie: CookieConfig) -> Self {
        Self {
            path: path.into(),
            cookie,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for CookieJarStore {
    fn get(&self) -> SessionResult<Option<SessionToken>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let jar = load_jar(&self.path)?;

        match jar.get(&self.cookie.name) {
            None | Some("") => Ok(None),
            Some(value) => match SessionToken::new(value) {
                Ok(token) => Ok(Some(token)),
                Err(_) => {
                    tracing::warn!(
                        cookie = %self.cookie.name,
                        "Ignoring malformed session cookie"
                    );
                    Ok(None)
                }
            },
        }
    }

    fn set(&self, token: &SessionToken) -> SessionResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut jar = load_jar(&self.path)?;
        jar.set(&self.cookie.name, token.as_str())?;
        save_jar(&self.path, &jar)?;

        tracing::debug!(
            path = %self.path.display(),
            token = %token.fingerprint(),
            "Session token stored"
        );
        Ok(())
    }

    fn remove(&self) -> SessionResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut jar = load_jar(&self.path)?;
        if jar.remove(&self.cookie.name) {
            save_jar(&self.path, &jar)?;
            tracing::debug!(path = %self.path.display(), "Session token removed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store(dir: &tempfile::TempDir) -> CookieJarStore {
        CookieJarStore::new(dir.path().join("cookies.jar"), CookieConfig::default())
    }

    #[test]
    fn test_missing_jar_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store(&dir).get().unwrap(), None);
    }

    #[test]
    fn test_token_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let token = SessionToken::new("eyJ.payload.sig").unwrap();
        store(&dir).set(&token).unwrap();

        // 新しいインスタンス（再読み込み相当）から読める
        assert_eq!(store(&dir).get().unwrap(), Some(token));
    }

    #[test]
    fn test_preserves_other_cookies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.jar");
        fs::write(&path, "theme=dark\ntoken=old\n").unwrap();

        let store = CookieJarStore::new(&path, CookieConfig::default());
        store.set(&SessionToken::new("new").unwrap()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "theme=dark\ntoken=new\n");

        store.remove().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "theme=dark\n");
        store.remove().unwrap();
    }

    #[test]
    fn test_custom_cookie_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.jar");
        fs::write(&path, "token=ignored\nhr_token=abc\n").unwrap();

        let store = CookieJarStore::new(&path, CookieConfig::named("hr_token"));
        assert_eq!(store.get().unwrap().unwrap().as_str(), "abc");
    }

    #[test]
    fn test_unreadable_jar_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        // ディレクトリはファイルとして読めない
        let store = CookieJarStore::new(dir.path(), CookieConfig::default());
        assert!(matches!(store.get(), Err(SessionError::Storage(_))));
    }
}
