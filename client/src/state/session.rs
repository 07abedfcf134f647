//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided through context by `Providers` and read by pages that render
//! identity-dependent UI. Only presence of a session drives behavior; the
//! user fields are display data from the auth service.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::Deserialize;

/// User block of an auth-service session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Session as returned by `GET /api/auth/session`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    #[serde(default)]
    pub expires: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub status: SessionStatus,
    pub session: Option<Session>,
}

impl SessionState {
    /// Settle the state from a fetched session (or its absence).
    #[must_use]
    pub fn resolved(session: Option<Session>) -> Self {
        let status = if session.is_some() { SessionStatus::Authenticated } else { SessionStatus::Unauthenticated };
        Self { status, session }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// Best display name for the signed-in user.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let user = &self.session.as_ref()?.user;
        user.name.as_deref().or(user.email.as_deref())
    }
}

/// Parse a session endpoint body.
///
/// The auth service answers `{}` or `null` when there is no session, so
/// anything without a `user` object is treated as signed out.
#[must_use]
pub fn parse_session_body(raw: &str) -> Option<Session> {
    serde_json::from_str::<Option<Session>>(raw).ok().flatten()
}

/// Polling policy for re-reading the session endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionRefresh {
    /// Seconds between refetches; `None` fetches once on mount.
    pub interval_secs: Option<u32>,
}
