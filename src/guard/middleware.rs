//! Axum middleware applying the edge guard to every intercepted request.
//!
//! Flow: matcher -> classify -> (oracle, only when the class depends on it)
//! -> decide -> 307 redirect or pass through. An oracle failure counts as
//! logged out, so protected pages fail closed.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use super::GuardDecision;
use crate::state::AppState;

#[cfg(test)]
#[path = "middleware_test.rs"]
mod tests;

pub async fn edge_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if !state.matcher.intercepts(&path) {
        return next.run(request).await;
    }

    let class = state.guard.routes().classify(&path);
    let logged_in = if class.depends_on_session() {
        match state.oracle.is_authenticated(request.headers()).await {
            Ok(logged_in) => logged_in,
            Err(e) => {
                tracing::warn!(%path, error = %e, "session lookup failed; treating as logged out");
                false
            }
        }
    } else {
        false
    };

    match state.guard.decide_class(class, logged_in) {
        GuardDecision::Redirect(target) => {
            tracing::debug!(%path, ?class, logged_in, location = %target, "edge guard redirect");
            Redirect::temporary(target).into_response()
        }
        GuardDecision::Allow => {
            tracing::debug!(%path, ?class, logged_in, "edge guard allow");
            next.run(request).await
        }
    }
}
