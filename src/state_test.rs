use super::*;
use crate::config::AuthServiceConfig;
use crate::guard::RouteConfig;

fn config(base_url: Option<&str>) -> GatewayConfig {
    GatewayConfig {
        port: 3000,
        routes: RouteConfig::default(),
        excluded_prefixes: vec!["api".to_owned()],
        auth: AuthServiceConfig {
            base_url: base_url.map(str::to_owned),
            session_cookie: "authjs.session-token".to_owned(),
            timeout_secs: 5,
        },
    }
}

#[test]
fn without_auth_service_proxy_is_disabled() {
    let state = AppState::from_config(&config(None)).unwrap();
    assert!(state.auth_proxy.is_none());
    assert!(!state.matcher.intercepts("/api/auth/session"));
    assert!(state.matcher.intercepts("/pkg/client.js"));
    assert_eq!(state.guard.routes(), &RouteConfig::default());
}

#[test]
fn with_auth_service_proxy_targets_it() {
    let state = AppState::from_config(&config(Some("http://auth.local:4000"))).unwrap();
    let proxy = state.auth_proxy.as_ref().unwrap();
    assert_eq!(proxy.base_url(), "http://auth.local:4000");
}

#[tokio::test]
async fn cookie_oracle_used_without_auth_service() {
    let state = AppState::from_config(&config(None)).unwrap();
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(axum::http::header::COOKIE, "authjs.session-token=abc".parse().unwrap());
    assert!(state.oracle.is_authenticated(&headers).await.unwrap());
}
