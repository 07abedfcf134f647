//! Session oracle: answers "is this request authenticated?".
//!
//! SYSTEM CONTEXT
//! ==============
//! The edge guard never inspects credentials itself. It asks a
//! `SessionOracle`, which is resolved before any guard decision is made.
//! `RemoteSessionOracle` asks the auth service; `CookieSessionOracle` only
//! checks that a session cookie is present and is used when no auth service
//! URL is configured.

pub mod remote;

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;

pub use remote::RemoteSessionOracle;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub const DEFAULT_SESSION_COOKIE: &str = "authjs.session-token";

const SECURE_COOKIE_PREFIX: &str = "__Secure-";

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("session lookup failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("session lookup returned status {0}")]
    Status(u16),
}

#[async_trait]
pub trait SessionOracle: Send + Sync {
    /// Resolve login state from the request headers.
    ///
    /// # Errors
    ///
    /// Returns an error when the session source cannot be reached; callers
    /// treat that as logged out.
    async fn is_authenticated(&self, headers: &HeaderMap) -> Result<bool, OracleError>;
}

/// Logged in iff a non-empty session cookie is present.
///
/// Accepts the plain name and its `__Secure-` variant, which the auth
/// service sets when served over HTTPS. Tokens over the 4 KB cookie limit
/// are split into numbered chunks; any non-empty chunk counts.
#[derive(Debug, Clone)]
pub struct CookieSessionOracle {
    cookie_name: String,
}

impl CookieSessionOracle {
    #[must_use]
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self { cookie_name: cookie_name.into() }
    }

    #[must_use]
    pub fn has_session_cookie(&self, headers: &HeaderMap) -> bool {
        CookieJar::from_headers(headers)
            .iter()
            .any(|cookie| !cookie.value().is_empty() && self.is_session_cookie_name(cookie.name()))
    }

    /// `<name>`, `<name>.<n>` (chunks of an oversized token), with or
    /// without the `__Secure-` prefix.
    fn is_session_cookie_name(&self, name: &str) -> bool {
        let name = name.strip_prefix(SECURE_COOKIE_PREFIX).unwrap_or(name);
        let Some(rest) = name.strip_prefix(self.cookie_name.as_str()) else {
            return false;
        };
        match rest.strip_prefix('.') {
            None => rest.is_empty(),
            Some(chunk) => !chunk.is_empty() && chunk.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

impl Default for CookieSessionOracle {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

#[async_trait]
impl SessionOracle for CookieSessionOracle {
    async fn is_authenticated(&self, headers: &HeaderMap) -> Result<bool, OracleError> {
        Ok(self.has_session_cookie(headers))
    }
}
