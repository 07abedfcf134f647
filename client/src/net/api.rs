//! REST helpers for talking to the auth service through the gateway.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Credential submissions return `Result<AuthActionResult, String>`. A body
//! the service sent on purpose (even with a 4xx status) becomes the
//! `AuthActionResult`; only transport failures and unreadable bodies become
//! `Err`, which the form turns into its generic message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::form::fields::{SignInValues, SignUpValues};
use crate::form::result::AuthActionResult;
use crate::state::session::Session;

pub const SESSION_ENDPOINT: &str = "/api/auth/session";
/// JSON action answering `{success}` / `{error}`. Not Auth.js's own
/// `callback/credentials`, which wants a CSRF form post and redirects.
pub const CREDENTIALS_SIGN_IN_ENDPOINT: &str = "/api/auth/login";
pub const SIGN_UP_ENDPOINT: &str = "/api/auth/register";
pub const SIGN_OUT_ENDPOINT: &str = "/api/auth/signout";

/// Browser URL that starts an OAuth sign-in with `provider`.
#[must_use]
pub fn oauth_sign_in_url(provider: &str, callback_url: &str) -> String {
    format!(
        "/api/auth/signin/{}?callbackUrl={}",
        urlencoding::encode(provider),
        urlencoding::encode(callback_url)
    )
}

#[cfg(any(test, feature = "hydrate"))]
fn action_failed_message(endpoint: &str, status: u16) -> String {
    format!("{endpoint} failed: {status}")
}

/// Fetch the current session. Returns `None` when signed out or on the server.
pub async fn fetch_session() -> Option<Session> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(SESSION_ENDPOINT).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        let body = resp.text().await.ok()?;
        crate::state::session::parse_session_body(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Submit email + password to the credentials provider.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is unreadable.
pub async fn sign_in_with_credentials(values: SignInValues) -> Result<AuthActionResult, String> {
    post_action(CREDENTIALS_SIGN_IN_ENDPOINT, &values).await
}

/// Register a new account.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is unreadable.
pub async fn sign_up(values: SignUpValues) -> Result<AuthActionResult, String> {
    post_action(SIGN_UP_ENDPOINT, &values).await
}

async fn post_action<P: serde::Serialize>(endpoint: &str, payload: &P) -> Result<AuthActionResult, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(endpoint)
            .json(payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        match resp.json::<AuthActionResult>().await {
            Ok(AuthActionResult::Success) if !resp.ok() => Err(action_failed_message(endpoint, status)),
            Ok(result) => Ok(result),
            Err(_) => Err(action_failed_message(endpoint, status)),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (endpoint, payload);
        Err("not available on server".to_owned())
    }
}

/// End the session and reload the app.
pub async fn sign_out() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post(SIGN_OUT_ENDPOINT).send().await;
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/sign-in");
        }
    }
}

/// Hand the browser over to the auth service's OAuth flow for `provider`.
///
/// No form validation runs; the provider and the auth service own the rest.
pub fn oauth_sign_in(provider: &str) {
    let url = oauth_sign_in_url(provider, "/");
    log::debug!("starting oauth sign-in via {url}");
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(&url);
        }
    }
}
