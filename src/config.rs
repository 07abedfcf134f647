//! Gateway configuration from environment variables.
//!
//! DESIGN
//! ======
//! All reads go through a lookup function so tests can supply a map instead
//! of mutating the process environment. `from_env` plugs in `std::env::var`.
//! Numeric settings fall back to their defaults when missing or malformed;
//! route lists and the auth service URL are validated and reported.

use crate::guard::matcher::DEFAULT_EXCLUDED_PREFIXES;
use crate::guard::{RouteConfig, RouteConfigError};
use crate::session::DEFAULT_SESSION_COOKIE;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid route configuration: {0}")]
    Routes(#[from] RouteConfigError),
    #[error("AUTH_SERVICE_URL must start with http:// or https://, got '{0}'")]
    AuthServiceUrl(String),
    #[error("failed to build auth service client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Where and how to reach the external auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthServiceConfig {
    /// Origin without trailing slash. `None` disables the proxy and switches
    /// the guard to cookie-presence checks.
    pub base_url: Option<String>,
    pub session_cookie: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub port: u16,
    pub routes: RouteConfig,
    pub excluded_prefixes: Vec<String>,
    pub auth: AuthServiceConfig,
}

impl GatewayConfig {
    /// # Errors
    ///
    /// Returns an error if the route lists or auth service URL are invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns an error if the route lists or auth service URL are invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = RouteConfig::default();
        let routes = RouteConfig {
            api_auth_prefix: lookup("API_AUTH_PREFIX").map_or(defaults.api_auth_prefix, |v| v.trim().to_owned()),
            auth_routes: lookup("AUTH_ROUTES").map_or(defaults.auth_routes, |v| parse_list(&v)),
            public_routes: lookup("PUBLIC_ROUTES").map_or(defaults.public_routes, |v| parse_list(&v)),
            default_login_redirect: lookup("DEFAULT_LOGIN_REDIRECT")
                .map_or(defaults.default_login_redirect, |v| v.trim().to_owned()),
            sign_in_path: lookup("SIGN_IN_PATH").map_or(defaults.sign_in_path, |v| v.trim().to_owned()),
        };
        routes.validate()?;

        let excluded_prefixes = lookup("GUARD_EXCLUDED_PREFIXES").map_or_else(
            || DEFAULT_EXCLUDED_PREFIXES.iter().map(|s| (*s).to_owned()).collect(),
            |v| parse_list(&v),
        );

        let base_url = match lookup("AUTH_SERVICE_URL").map(|v| v.trim().to_owned()) {
            Some(url) if url.is_empty() => None,
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                Some(url.trim_end_matches('/').to_owned())
            }
            Some(url) => return Err(ConfigError::AuthServiceUrl(url)),
            None => None,
        };

        let auth = AuthServiceConfig {
            base_url,
            session_cookie: lookup("SESSION_COOKIE")
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_owned()),
            timeout_secs: env_parse(&lookup, "AUTH_SERVICE_TIMEOUT_SECS", DEFAULT_AUTH_TIMEOUT_SECS),
        };

        Ok(Self { port: env_parse(&lookup, "PORT", DEFAULT_PORT), routes, excluded_prefixes, auth })
    }
}

pub(crate) fn env_parse<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    lookup(key).and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Comma-separated list; entries trimmed, empties dropped.
pub(crate) fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty()).map(str::to_owned).collect()
}
