//! Pass-through for the auth service's own endpoints.
//!
//! DESIGN
//! ======
//! The Leptos client posts credentials and reads the session from
//! `/api/auth/*` on its own origin. The gateway forwards those requests
//! unchanged to `AUTH_SERVICE_URL` so cookies set by the auth service land
//! on the gateway's origin. Upstream redirects are handed back to the
//! browser, not followed.

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;

use crate::state::AppState;

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

/// Largest request body forwarded upstream.
const MAX_BODY_BYTES: usize = 64 * 1024;

const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Connection-scoped headers, plus the ones hyper recomputes. Never
/// forwarded in either direction.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    [
        header::CONNECTION,
        header::PROXY_AUTHENTICATE,
        header::PROXY_AUTHORIZATION,
        header::TE,
        header::TRAILER,
        header::TRANSFER_ENCODING,
        header::UPGRADE,
        header::HOST,
        header::CONTENT_LENGTH,
    ]
    .contains(name)
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("request body rejected: {0}")]
    Body(#[from] axum::Error),
    #[error("auth service request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct AuthProxy {
    client: reqwest::Client,
    base_url: String,
}

impl AuthProxy {
    /// `base_url` is the auth service origin without a trailing slash.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self { client, base_url: base_url.to_owned() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replay `request` against the auth service and relay its answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is too large or the auth service cannot
    /// be reached.
    pub async fn forward(&self, request: Request) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();
        let path_and_query = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
        let url = format!("{}{path_and_query}", self.base_url);
        let body = to_bytes(body, MAX_BODY_BYTES).await?;

        let mut headers = strip_hop_by_hop(&parts.headers);
        if let Some(host) = parts.headers.get(header::HOST) {
            headers.insert(HeaderName::from_static(X_FORWARDED_HOST), host.clone());
        }

        let upstream = self.client.request(parts.method, &url).headers(headers).body(body).send().await?;

        let status = upstream.status();
        let headers = strip_hop_by_hop(upstream.headers());
        let bytes = upstream.bytes().await?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

/// 413 when the body hit `MAX_BODY_BYTES`, 400 for any other read failure.
fn body_error_status(err: &axum::Error) -> StatusCode {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if inner.is::<LengthLimitError>() {
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
        source = inner.source();
    }
    StatusCode::BAD_REQUEST
}

fn strip_hop_by_hop(headers: &HeaderMap<HeaderValue>) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !is_hop_by_hop(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// `ANY {api_auth_prefix}/{*rest}`.
pub async fn forward(State(state): State<AppState>, request: Request) -> Response {
    let Some(proxy) = state.auth_proxy.as_ref() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "auth service not configured").into_response();
    };

    let path = request.uri().path().to_owned();
    match proxy.forward(request).await {
        Ok(response) => response,
        Err(ProxyError::Body(e)) => {
            tracing::debug!(%path, error = %e, "auth proxy could not read request body");
            body_error_status(&e).into_response()
        }
        Err(e) => {
            tracing::warn!(%path, error = %e, "auth proxy failed");
            (StatusCode::BAD_GATEWAY, "auth service unavailable").into_response()
        }
    }
}
