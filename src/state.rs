//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and the guard middleware via the
//! `State` extractor. Everything in it is fixed at startup; Clone only bumps
//! reference counts.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{ConfigError, GatewayConfig};
use crate::guard::EdgeGuard;
use crate::guard::matcher::RequestMatcher;
use crate::routes::auth::AuthProxy;
use crate::session::{CookieSessionOracle, RemoteSessionOracle, SessionOracle};

#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<EdgeGuard>,
    pub matcher: Arc<RequestMatcher>,
    pub oracle: Arc<dyn SessionOracle>,
    /// `None` when no auth service is configured; proxied calls answer 503.
    pub auth_proxy: Option<AuthProxy>,
}

impl AppState {
    #[must_use]
    pub fn new(
        guard: EdgeGuard,
        matcher: RequestMatcher,
        oracle: Arc<dyn SessionOracle>,
        auth_proxy: Option<AuthProxy>,
    ) -> Self {
        Self { guard: Arc::new(guard), matcher: Arc::new(matcher), oracle, auth_proxy }
    }

    /// Wire the guard, oracle and proxy from configuration.
    ///
    /// With an auth service URL, session checks and `/api/auth/*` both go to
    /// that service over one shared client. Without it, the guard only looks
    /// for the session cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let guard = EdgeGuard::new(config.routes.clone());
        let matcher = RequestMatcher::new(config.excluded_prefixes.clone());

        let Some(base_url) = config.auth.base_url.as_deref() else {
            tracing::warn!("AUTH_SERVICE_URL not set; sessions checked by cookie presence, auth proxy disabled");
            let oracle = Arc::new(CookieSessionOracle::new(config.auth.session_cookie.clone()));
            return Ok(Self::new(guard, matcher, oracle, None));
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.auth.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let oracle = Arc::new(RemoteSessionOracle::new(client.clone(), base_url));
        let proxy = AuthProxy::new(client, base_url);
        Ok(Self::new(guard, matcher, oracle, Some(proxy)))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
