use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header};
use axum::routing::{get, post};
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers::{FixedSessionOracle, test_app_state};

/// Fake auth service with an echo endpoint and a redirecting sign-in.
async fn spawn_auth_service() -> String {
    let app = Router::new()
        .route(
            "/api/auth/callback/credentials",
            post(|headers: HeaderMap, uri: axum::http::Uri, body: String| async move {
                let host = headers.get(X_FORWARDED_HOST).and_then(|v| v.to_str().ok()).unwrap_or("-").to_owned();
                let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()).unwrap_or("-").to_owned();
                let mut response = format!("{uri}|{host}|{cookie}|{body}").into_response();
                let set_cookie = response.headers_mut();
                set_cookie.append(header::SET_COOKIE, HeaderValue::from_static("a=1; Path=/"));
                set_cookie.append(header::SET_COOKIE, HeaderValue::from_static("b=2; Path=/"));
                response
            }),
        )
        .route(
            "/api/auth/signin/google",
            get(|| async { (StatusCode::FOUND, [(header::LOCATION, "https://accounts.example.com/o/auth")]) }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().redirect(reqwest::redirect::Policy::none()).build().unwrap()
}

fn router(state: AppState) -> Router {
    Router::new().route("/api/auth/{*rest}", axum::routing::any(forward)).with_state(state)
}

#[test]
fn hop_by_hop_headers_are_dropped() {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::HOST, HeaderValue::from_static("app.local"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.append(header::COOKIE, HeaderValue::from_static("a=1"));

    let out = strip_hop_by_hop(&headers);
    assert_eq!(out.len(), 2);
    assert!(out.contains_key(header::CONTENT_TYPE));
    assert!(out.contains_key(header::COOKIE));
}

#[tokio::test]
async fn only_length_limit_is_payload_too_large() {
    let too_long = to_bytes(Body::from(vec![b'x'; 16]), 8).await.unwrap_err();
    assert_eq!(body_error_status(&too_long), StatusCode::PAYLOAD_TOO_LARGE);

    let reset = axum::Error::new(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "client went away"));
    assert_eq!(body_error_status(&reset), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn forwards_request_and_relays_response() {
    let base = spawn_auth_service().await;
    let mut state = test_app_state(FixedSessionOracle::logged_out());
    state.auth_proxy = Some(AuthProxy::new(client(), &base));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/callback/credentials?json=true")
        .header(header::HOST, "app.local")
        .header(header::COOKIE, "authjs.csrf-token=t")
        .body(Body::from("email=a%40b.co"))
        .unwrap();
    let resp = router(state).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookies: Vec<_> = resp.headers().get_all(header::SET_COOKIE).iter().collect();
    assert_eq!(cookies.len(), 2);
    let body = to_bytes(resp.into_body(), MAX_BODY_BYTES).await.unwrap();
    assert_eq!(
        std::str::from_utf8(&body).unwrap(),
        "/api/auth/callback/credentials?json=true|app.local|authjs.csrf-token=t|email=a%40b.co"
    );
}

#[tokio::test]
async fn upstream_redirect_is_not_followed() {
    let base = spawn_auth_service().await;
    let mut state = test_app_state(FixedSessionOracle::logged_out());
    state.auth_proxy = Some(AuthProxy::new(client(), &base));

    let req = Request::builder().uri("/api/auth/signin/google").body(Body::empty()).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "https://accounts.example.com/o/auth");
}

#[tokio::test]
async fn unconfigured_proxy_is_unavailable() {
    let state = test_app_state(FixedSessionOracle::logged_out());
    let req = Request::builder().uri("/api/auth/session").body(Body::empty()).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut state = test_app_state(FixedSessionOracle::logged_out());
    state.auth_proxy = Some(AuthProxy::new(client(), &format!("http://{addr}")));

    let req = Request::builder().uri("/api/auth/session").body(Body::empty()).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut state = test_app_state(FixedSessionOracle::logged_out());
    state.auth_proxy = Some(AuthProxy::new(client(), "http://127.0.0.1:1"));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .body(Body::from(vec![b'x'; MAX_BODY_BYTES + 1]))
        .unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
