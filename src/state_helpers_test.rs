use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http::HeaderMap;

use super::*;
use crate::guard::RouteConfig;
use crate::session::OracleError;

/// Oracle with a canned answer that counts how often it is asked.
pub struct FixedSessionOracle {
    answer: Option<bool>,
    calls: AtomicUsize,
}

impl FixedSessionOracle {
    #[must_use]
    pub fn logged_in() -> Arc<Self> {
        Arc::new(Self { answer: Some(true), calls: AtomicUsize::new(0) })
    }

    #[must_use]
    pub fn logged_out() -> Arc<Self> {
        Arc::new(Self { answer: Some(false), calls: AtomicUsize::new(0) })
    }

    /// Every lookup fails.
    #[must_use]
    pub fn failing() -> Arc<Self> {
        Arc::new(Self { answer: None, calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionOracle for FixedSessionOracle {
    async fn is_authenticated(&self, _headers: &HeaderMap) -> Result<bool, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.ok_or(OracleError::Status(503))
    }
}

/// Default routes and matcher, the given oracle, no auth proxy.
#[must_use]
pub fn test_app_state(oracle: Arc<dyn SessionOracle>) -> AppState {
    AppState::new(EdgeGuard::new(RouteConfig::default()), RequestMatcher::default(), oracle, None)
}
