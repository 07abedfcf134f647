//! Session lookup against the external auth service.
//!
//! `GET {base}/api/auth/session` with the caller's cookies forwarded. The
//! service answers `null` or `{}` for anonymous callers and an object with a
//! non-null `user` for signed-in ones.

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use super::{OracleError, SessionOracle};

#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;

pub const SESSION_PATH: &str = "/api/auth/session";

#[derive(Debug, Clone)]
pub struct RemoteSessionOracle {
    client: reqwest::Client,
    session_url: String,
}

impl RemoteSessionOracle {
    /// `base_url` is the auth service origin without a trailing slash.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self { client, session_url: format!("{base_url}{SESSION_PATH}") }
    }

    #[must_use]
    pub fn session_url(&self) -> &str {
        &self.session_url
    }
}

/// All `Cookie` headers of the request joined into one value.
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let parts: Vec<&str> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();
    if parts.is_empty() { None } else { Some(parts.join("; ")) }
}

/// Whether a session response body names a user.
pub(crate) fn body_has_user(body: &serde_json::Value) -> bool {
    body.get("user").is_some_and(|user| !user.is_null())
}

#[async_trait]
impl SessionOracle for RemoteSessionOracle {
    async fn is_authenticated(&self, headers: &HeaderMap) -> Result<bool, OracleError> {
        // No cookies means no session; skip the round trip.
        let Some(cookie) = cookie_header(headers) else {
            return Ok(false);
        };

        let response = self.client.get(&self.session_url).header(COOKIE, cookie).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        Ok(body_has_user(&body))
    }
}
