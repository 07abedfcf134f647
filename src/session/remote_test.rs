use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde_json::json;

use super::*;

/// Fake auth service: signed in iff the cookie carries `token=good`.
async fn spawn_auth_service(hits: Arc<AtomicUsize>) -> String {
    let app = Router::new()
        .route(
            SESSION_PATH,
            get(move |headers: HeaderMap| {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let cookie = headers.get(COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
                    if cookie.contains("token=boom") {
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                    if cookie.contains("token=good") {
                        Json(json!({ "user": { "name": "Ada", "email": "ada@example.com" }, "expires": "2030-01-01" }))
                            .into_response()
                    } else {
                        Json(json!({})).into_response()
                    }
                }
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn cookies(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, value.parse().unwrap());
    headers
}

#[test]
fn session_url_joins_base() {
    let oracle = RemoteSessionOracle::new(reqwest::Client::new(), "http://auth.local");
    assert_eq!(oracle.session_url(), "http://auth.local/api/auth/session");
}

#[test]
fn user_field_decides() {
    assert!(body_has_user(&json!({ "user": { "name": "Ada" } })));
    assert!(!body_has_user(&json!({ "user": null })));
    assert!(!body_has_user(&json!({})));
    assert!(!body_has_user(&serde_json::Value::Null));
}

#[test]
fn cookie_headers_are_joined() {
    let mut headers = HeaderMap::new();
    headers.append(COOKIE, "a=1".parse().unwrap());
    headers.append(COOKIE, " b=2 ".parse().unwrap());
    assert_eq!(cookie_header(&headers).as_deref(), Some("a=1; b=2"));
    assert_eq!(cookie_header(&HeaderMap::new()), None);
}

#[tokio::test]
async fn forwards_cookie_and_reads_user() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_auth_service(hits.clone()).await;
    let oracle = RemoteSessionOracle::new(reqwest::Client::new(), &base);

    assert!(oracle.is_authenticated(&cookies("token=good")).await.unwrap());
    assert!(!oracle.is_authenticated(&cookies("token=stale")).await.unwrap());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn no_cookie_skips_lookup() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_auth_service(hits.clone()).await;
    let oracle = RemoteSessionOracle::new(reqwest::Client::new(), &base);

    assert!(!oracle.is_authenticated(&HeaderMap::new()).await.unwrap());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn error_status_is_reported() {
    let base = spawn_auth_service(Arc::new(AtomicUsize::new(0))).await;
    let oracle = RemoteSessionOracle::new(reqwest::Client::new(), &base);

    let err = oracle.is_authenticated(&cookies("token=boom")).await.unwrap_err();
    assert!(matches!(err, OracleError::Status(500)), "{err}");
}

#[tokio::test]
async fn unreachable_service_is_an_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let oracle = RemoteSessionOracle::new(reqwest::Client::new(), &format!("http://{addr}"));
    let err = oracle.is_authenticated(&cookies("token=good")).await.unwrap_err();
    assert!(matches!(err, OracleError::Request(_)), "{err}");
}
