//! Session cookie persistence and request header construction.
//!
//! Interactive login (browser-driven cookie capture) lives outside this
//! tool; this module only owns the interface: the `session.json` format the
//! capture step writes, and the opaque header map the download and catalog
//! clients attach verbatim to every request.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One captured session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
}

/// Loads and saves the persisted session cookies.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store rooted at the given config directory (`<dir>/session.json`).
    #[must_use]
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join("session.json"),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored cookies.
    ///
    /// Returns `None` when the file is absent or malformed; the caller
    /// reports that a login is needed.
    #[must_use]
    pub fn load(&self) -> Option<Vec<SessionCookie>> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(cookies) => Some(cookies),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session file is malformed");
                None
            }
        }
    }

    /// Persists cookies, creating the config directory if needed.
    ///
    /// # Errors
    ///
    /// Returns the IO error when the directory or file cannot be written.
    pub fn save(&self, cookies: &[SessionCookie]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(cookies).map_err(io::Error::other)?;
        fs::write(&self.path, body)?;
        debug!(path = %self.path.display(), count = cookies.len(), "session saved");
        Ok(())
    }
}

/// Joins cookies into a single `Cookie` header value (`name=value; ...`).
#[must_use]
pub fn cookie_header(cookies: &[SessionCookie]) -> String {
    cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Builds the opaque header map attached to authenticated requests.
///
/// An empty cookie list (or a value that is not a valid header) yields an
/// empty map, i.e. unauthenticated requests.
#[must_use]
pub fn auth_headers(cookies: &[SessionCookie]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if cookies.is_empty() {
        return headers;
    }
    match HeaderValue::from_str(&cookie_header(cookies)) {
        Ok(value) => {
            headers.insert(COOKIE, value);
        }
        Err(e) => {
            warn!(error = %e, "session cookies contain invalid header bytes, sending no auth");
        }
    }
    headers
}
