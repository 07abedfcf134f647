//! Route classification and the edge guard decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every intercepted request is classified against an immutable
//! `RouteConfig`, then `EdgeGuard` turns (class, logged-in) into allow or
//! redirect. Both are pure; `middleware` does the I/O around them.
//!
//! Classification priority: API-auth prefix, then exact auth routes, then
//! exact public routes, else protected. API-auth paths are never redirected.

pub mod matcher;
pub mod middleware;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub const DEFAULT_API_AUTH_PREFIX: &str = "/api/auth";
pub const DEFAULT_LOGIN_REDIRECT: &str = "/settings";
pub const DEFAULT_SIGN_IN_PATH: &str = "/sign-in";
pub const DEFAULT_AUTH_ROUTES: &[&str] = &["/sign-in", "/sign-up"];
pub const DEFAULT_PUBLIC_ROUTES: &[&str] = &["/"];

// =============================================================================
// ROUTE CONFIG
// =============================================================================

/// Static route lists consulted by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Prefix of the auth service's own endpoints; always passed through.
    pub api_auth_prefix: String,
    /// Exact paths only signed-out users may visit (sign-in, sign-up).
    pub auth_routes: Vec<String>,
    /// Exact paths anyone may visit.
    pub public_routes: Vec<String>,
    /// Where signed-in users are sent when they hit an auth route.
    pub default_login_redirect: String,
    /// Where signed-out users are sent when they hit a protected route.
    pub sign_in_path: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            api_auth_prefix: DEFAULT_API_AUTH_PREFIX.to_owned(),
            auth_routes: DEFAULT_AUTH_ROUTES.iter().map(|s| (*s).to_owned()).collect(),
            public_routes: DEFAULT_PUBLIC_ROUTES.iter().map(|s| (*s).to_owned()).collect(),
            default_login_redirect: DEFAULT_LOGIN_REDIRECT.to_owned(),
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteConfigError {
    #[error("{name} must be an absolute path, got '{value}'")]
    NotAbsolute { name: &'static str, value: String },
    #[error("sign-in path '{0}' is protected; signed-out users would loop")]
    SignInLoop(String),
    #[error("login redirect '{0}' is an auth route; signed-in users would loop")]
    LoginRedirectLoop(String),
}

impl RouteConfig {
    /// Classify a request path.
    #[must_use]
    pub fn classify(&self, path: &str) -> RouteClass {
        if path.starts_with(&self.api_auth_prefix) {
            RouteClass::ApiAuthPrefix
        } else if self.auth_routes.iter().any(|route| route == path) {
            RouteClass::AuthOnly
        } else if self.public_routes.iter().any(|route| route == path) {
            RouteClass::Public
        } else {
            RouteClass::Protected
        }
    }

    /// Reject configurations that are malformed or make a redirect loop.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), RouteConfigError> {
        let singles = [
            ("API_AUTH_PREFIX", &self.api_auth_prefix),
            ("DEFAULT_LOGIN_REDIRECT", &self.default_login_redirect),
            ("SIGN_IN_PATH", &self.sign_in_path),
        ];
        let lists = self
            .auth_routes
            .iter()
            .map(|route| ("AUTH_ROUTES", route))
            .chain(self.public_routes.iter().map(|route| ("PUBLIC_ROUTES", route)));
        for (name, value) in singles.into_iter().chain(lists) {
            if !value.starts_with('/') {
                return Err(RouteConfigError::NotAbsolute { name, value: value.clone() });
            }
        }

        if self.classify(&self.sign_in_path) == RouteClass::Protected {
            return Err(RouteConfigError::SignInLoop(self.sign_in_path.clone()));
        }
        if self.classify(&self.default_login_redirect) == RouteClass::AuthOnly {
            return Err(RouteConfigError::LoginRedirectLoop(self.default_login_redirect.clone()));
        }
        Ok(())
    }
}

/// Access category of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    AuthOnly,
    ApiAuthPrefix,
    Protected,
}

impl RouteClass {
    /// Whether the guard's decision for this class depends on login state.
    #[must_use]
    pub const fn depends_on_session(self) -> bool {
        matches!(self, Self::AuthOnly | Self::Protected)
    }
}

// =============================================================================
// EDGE GUARD
// =============================================================================

/// Outcome of the guard for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision<'a> {
    Allow,
    Redirect(&'a str),
}

/// Request-time access decision over a fixed `RouteConfig`.
#[derive(Debug, Clone)]
pub struct EdgeGuard {
    routes: RouteConfig,
}

impl EdgeGuard {
    #[must_use]
    pub fn new(routes: RouteConfig) -> Self {
        Self { routes }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    /// Decide for an already-classified request.
    #[must_use]
    pub fn decide_class(&self, class: RouteClass, logged_in: bool) -> GuardDecision<'_> {
        match (class, logged_in) {
            (RouteClass::AuthOnly, true) => GuardDecision::Redirect(&self.routes.default_login_redirect),
            (RouteClass::Protected, false) => GuardDecision::Redirect(&self.routes.sign_in_path),
            (RouteClass::ApiAuthPrefix | RouteClass::Public, _)
            | (RouteClass::AuthOnly, false)
            | (RouteClass::Protected, true) => GuardDecision::Allow,
        }
    }

    /// Classify `path` and decide.
    #[must_use]
    pub fn decide(&self, path: &str, logged_in: bool) -> GuardDecision<'_> {
        self.decide_class(self.routes.classify(path), logged_in)
    }
}
