//! Landing page. Greets the signed-in user or links to sign-in.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::providers::use_session;
use crate::components::theme_toggle::ThemeToggle;
use crate::state::session::SessionStatus;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();

    let on_sign_out = move |_| {
        leptos::task::spawn_local(crate::net::api::sign_out());
    };

    view! {
        <main class="home-page">
            <ThemeToggle/>
            {move || match session.with(|s| s.status) {
                SessionStatus::Loading => view! { <p class="home-page__status">"Loading..."</p> }.into_any(),
                SessionStatus::Authenticated => {
                    let name = session.with(|s| s.display_name().unwrap_or("there").to_owned());
                    view! {
                        <p class="home-page__status">{format!("Signed in as {name}")}</p>
                        <button class="home-page__sign-out" type="button" on:click=on_sign_out>
                            "Sign out"
                        </button>
                    }
                        .into_any()
                }
                SessionStatus::Unauthenticated => view! {
                    <p class="home-page__status">
                        "You are not signed in. "
                        <A href="/sign-in">"Sign in"</A>
                    </p>
                }
                    .into_any(),
            }}
        </main>
    }
}
