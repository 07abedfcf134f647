use super::*;

#[test]
fn pages_are_intercepted() {
    let matcher = RequestMatcher::default();
    for path in ["/", "/sign-in", "/sign-up", "/settings", "/profile/7"] {
        assert!(matcher.intercepts(path), "{path}");
    }
}

#[test]
fn api_assets_and_favicon_are_skipped() {
    let matcher = RequestMatcher::default();
    for path in ["/api/auth/session", "/api/other", "/pkg/client.wasm", "/favicon.ico"] {
        assert!(!matcher.intercepts(path), "{path}");
    }
}

#[test]
fn prefix_test_is_raw_text() {
    let matcher = RequestMatcher::default();
    assert!(!matcher.intercepts("/apiary"));
    assert!(!matcher.intercepts("/pkgs"));
    assert!(matcher.intercepts("/settings/api"));
}

#[test]
fn custom_prefixes_replace_defaults() {
    let matcher = RequestMatcher::new(vec!["static".to_owned(), String::new()]);
    assert_eq!(matcher, RequestMatcher::new(vec!["static".to_owned()]));
    assert!(!matcher.intercepts("/static/app.css"));
    assert!(matcher.intercepts("/api/auth/session"));
    assert!(matcher.intercepts("/"));
}
