//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the auth-service pass-through, a health check,
//! the Leptos SSR pages and their `/pkg` assets. The edge guard wraps all of
//! it; its `RequestMatcher` decides which of those paths it actually checks.

pub mod auth;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::guard::middleware::edge_guard;
use crate::state::AppState;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

/// Auth service pass-through for the configured prefix and everything below.
fn api_routes(state: AppState) -> Router {
    let prefix = state.guard.routes().api_auth_prefix.trim_end_matches('/').to_owned();

    let mut router = Router::new().route(&format!("{prefix}/{{*rest}}"), any(auth::forward));
    if !prefix.is_empty() {
        router = router.route(&prefix, any(auth::forward));
    }
    router.with_state(state)
}

/// Merge API routes with `pages` and wrap them in the edge guard. The health
/// check is added after the guard layer so health checks never need a session.
pub fn gateway(state: AppState, pages: Router) -> Router {
    api_routes(state.clone())
        .merge(pages)
        .fallback(not_found)
        .layer(axum::middleware::from_fn_with_state(state, edge_guard))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
}

/// Full gateway: API routes + Leptos SSR pages + `/pkg` static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());
    let pages = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")));

    Ok(gateway(state, pages))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}
