//! Light/dark switch backed by the provided `ThemeConfig`.

use leptos::prelude::*;

use crate::util::theme::{ResolvedTheme, ThemeConfig, system_prefers_dark};

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = expect_context::<ThemeConfig>();
    let painted = RwSignal::new(theme.resolve(theme.default_theme, false));

    // Pick up the stored preference once mounted.
    Effect::new(move || {
        painted.set(theme.resolve(theme.read_preference(), system_prefers_dark()));
    });

    let on_toggle = move |_| {
        let next = painted.get_untracked().toggled();
        painted.set(theme.set_theme(next));
    };

    view! {
        <button class="theme-toggle" type="button" title="Toggle dark mode" on:click=on_toggle>
            {move || if painted.get() == ResolvedTheme::Dark { "☀" } else { "☾" }}
        </button>
    }
}
