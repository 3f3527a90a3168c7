//! Cookie Jar Infrastructure
//!
//! Persisted cookie storage for the console client. The jar is a plain text
//! file with one `name=value` pair per line; lines starting with `#` are
//! comments. Writes go to a sibling temp file and are renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default name of the session token cookie
pub const DEFAULT_TOKEN_COOKIE: &str = "token";

/// Cookie configuration for the persisted session key
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TOKEN_COOKIE.to_string(),
        }
    }
}

impl CookieConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Error raised by cookie jar operations
#[derive(Debug, thiserror::Error)]
pub enum CookieJarError {
    #[error("Cookie jar I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid cookie name: {0:?}")]
    InvalidName(String),

    #[error("Invalid cookie value for {0}")]
    InvalidValue(String),
}

/// Ordered set of cookies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: Vec<(String, String)>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse jar text. Malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut jar = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                tracing::debug!("Skipping malformed cookie jar line");
                continue;
            };
            let name = name.trim();
            if is_valid_name(name) {
                jar.upsert(name.to_string(), value.trim().to_string());
            }
        }
        jar
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Insert or replace a cookie
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), CookieJarError> {
        if !is_valid_name(name) {
            return Err(CookieJarError::InvalidName(name.to_string()));
        }
        if !is_valid_value(value) {
            return Err(CookieJarError::InvalidValue(name.to_string()));
        }
        self.upsert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Remove a cookie. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(key, _)| key != name);
        before != self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to jar text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.entries {
            out.push_str(name);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    fn upsert(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }
}

/// Load a jar from disk. A missing file is an empty jar.
pub fn load_jar(path: &Path) -> Result<CookieJar, CookieJarError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(CookieJar::parse(&text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(CookieJar::new()),
        Err(source) => Err(CookieJarError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persist a jar, replacing the file atomically
pub fn save_jar(path: &Path, jar: &CookieJar) -> Result<(), CookieJarError> {
    let io_err = |source| CookieJarError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, jar.to_text()).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b))
}

fn is_valid_value(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b.is_ascii_graphic() && b != b';' && b != b',' && b != b'"' && b != b'\\')
}
