//! Session and theme providers for the whole app tree.
//!
//! DESIGN
//! ======
//! Session state is an explicit `RwSignal<SessionState>` handed down through
//! Leptos context, so pages read it with `use_session()` and tests can
//! provide their own. Refreshing is the auth service's business: the
//! provider only re-reads its session endpoint on mount and, optionally, on
//! a fixed interval.

use leptos::prelude::*;

use crate::state::session::{SessionRefresh, SessionState};
use crate::util::theme::ThemeConfig;

/// Session signal provided by the nearest `Providers`.
///
/// # Panics
///
/// Panics if called outside a `Providers` subtree.
pub fn use_session() -> RwSignal<SessionState> {
    expect_context::<RwSignal<SessionState>>()
}

/// Re-read the session endpoint into `session`.
pub async fn refresh_session(session: RwSignal<SessionState>) {
    let fetched = crate::net::api::fetch_session().await;
    if session.try_set(SessionState::resolved(fetched)).is_some() {
        log::debug!("session signal disposed before refresh completed");
    }
}

/// Wrap `children` with session context and the theme configuration.
#[component]
pub fn Providers(
    #[prop(optional)] theme: Option<ThemeConfig>,
    #[prop(optional)] refresh: SessionRefresh,
    children: Children,
) -> impl IntoView {
    let theme = theme.unwrap_or_default();
    let session = RwSignal::new(SessionState::default());
    provide_context(theme);
    provide_context(session);

    // Effects only run in the browser.
    Effect::new(move || {
        let resolved = theme.init();
        log::debug!("theme applied: {}", resolved.as_str());
    });

    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(refresh_session(session));
        if let Some(secs) = refresh.interval_secs.filter(|secs| *secs > 0) {
            let interval = gloo_timers::callback::Interval::new(secs.saturating_mul(1000), move || {
                leptos::task::spawn_local(refresh_session(session));
            });
            // Dropped (and cancelled) when this owner is disposed.
            let _interval = StoredValue::new_local(interval);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = refresh;
    }

    children()
}
