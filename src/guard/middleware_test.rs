use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::LOCATION;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers::{FixedSessionOracle, test_app_state};

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "home" }))
        .route("/sign-in", get(|| async { "sign in" }))
        .route("/sign-up", get(|| async { "sign up" }))
        .route("/settings", get(|| async { "settings" }))
        .route("/api/auth/session", get(|| async { "session" }))
        .route("/pkg/client.js", get(|| async { "js" }))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(axum::middleware::from_fn_with_state(state, edge_guard))
}

async fn get_path(app: Router, path: &str) -> (StatusCode, Option<String>) {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let location = resp.headers().get(LOCATION).map(|v| v.to_str().unwrap().to_owned());
    (resp.status(), location)
}

#[tokio::test]
async fn signed_out_user_redirected_from_protected_page() {
    let oracle = FixedSessionOracle::logged_out();
    let (status, location) = get_path(app(test_app_state(oracle.clone())), "/settings").await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/sign-in"));
    assert_eq!(oracle.calls(), 1);
}

#[tokio::test]
async fn signed_in_user_reaches_protected_page() {
    let (status, location) = get_path(app(test_app_state(FixedSessionOracle::logged_in())), "/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
}

#[tokio::test]
async fn signed_in_user_bounced_from_sign_in() {
    for path in ["/sign-in", "/sign-up"] {
        let (status, location) = get_path(app(test_app_state(FixedSessionOracle::logged_in())), path).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location.as_deref(), Some("/settings"), "{path}");
    }
}

#[tokio::test]
async fn signed_out_user_sees_sign_in() {
    let (status, _) = get_path(app(test_app_state(FixedSessionOracle::logged_out())), "/sign-in").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn public_page_skips_session_lookup() {
    let oracle = FixedSessionOracle::logged_out();
    let (status, _) = get_path(app(test_app_state(oracle.clone())), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn excluded_paths_bypass_guard() {
    let oracle = FixedSessionOracle::logged_out();
    let state = test_app_state(oracle.clone());
    for path in ["/api/auth/session", "/pkg/client.js"] {
        let (status, _) = get_path(app(state.clone()), path).await;
        assert_eq!(status, StatusCode::OK, "{path}");
    }
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn api_auth_prefix_allowed_even_when_intercepted() {
    // With nothing excluded, the guard sees /api/auth/* and must still allow it.
    let oracle = FixedSessionOracle::logged_out();
    let mut state = test_app_state(oracle.clone());
    state.matcher = Arc::new(crate::guard::matcher::RequestMatcher::new(Vec::new()));

    let (status, _) = get_path(app(state), "/api/auth/session").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn oracle_failure_fails_closed() {
    let oracle = FixedSessionOracle::failing();
    let state = test_app_state(oracle.clone());

    let (status, location) = get_path(app(state.clone()), "/settings").await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/sign-in"));

    let (status, _) = get_path(app(state), "/sign-in").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(oracle.calls(), 2);
}

#[tokio::test]
async fn unknown_path_is_protected() {
    let (status, location) = get_path(app(test_app_state(FixedSessionOracle::logged_out())), "/nowhere").await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/sign-in"));

    let (status, _) = get_path(app(test_app_state(FixedSessionOracle::logged_in())), "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
