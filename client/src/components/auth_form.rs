//! Shared sign-in / sign-up form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages hand in the flow, a schema, default values and the credential
//! action. Rendering and submission both key off the record's field list,
//! and all state transitions go through `form::state::FormState`.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::form::FormMode;
use crate::form::fields::{FormRecord, field_label, rendered_input_kind};
use crate::form::schema::Schema;
use crate::form::state::FormState;
use crate::form::submit::{SubmitAction, submit};
use crate::net::api;

/// Button label for the OAuth secondary action.
fn oauth_label(provider: &str) -> String {
    let mut chars = provider.chars();
    let name = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect::<String>())
        .unwrap_or_default();
    format!("Sign in with {name}")
}

/// Schema-driven auth form with a non-overlapping async submit.
#[component]
pub fn AuthForm<T: FormRecord>(
    mode: FormMode,
    schema: Schema<T>,
    default_values: T,
    on_submit: SubmitAction<T>,
    #[prop(default = "google")] oauth_provider: &'static str,
) -> impl IntoView {
    let state = RwSignal::new(FormState::new(default_values));
    let schema = StoredValue::new(schema);
    let action = StoredValue::new(on_submit);
    let navigate = use_navigate();
    let pending = move || state.with(FormState::pending);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let schema = schema.get_value();
        let action = action.get_value();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let navigator = move |path: &str| navigate(path, NavigateOptions::default());
            let outcome = submit(&state, &schema, &action, &navigator).await;
            log::debug!("auth form submit finished: {outcome:?}");
        });
    };

    let fields = T::FIELDS
        .iter()
        .copied()
        .map(|field| {
            let input_id = format!("auth-{}", field.as_str());
            view! {
                <div class="auth-form__item">
                    <label class="auth-form__label" for=input_id.clone()>
                        {field_label(field)}
                    </label>
                    <input
                        id=input_id
                        class="auth-form__input"
                        name=field.as_str()
                        type=rendered_input_kind(field).as_str()
                        required=true
                        disabled=pending
                        prop:value=move || state.with(|s| s.value(field).to_owned())
                        on:input=move |ev| state.update(|s| s.set_value(field, event_target_value(&ev)))
                    />
                    {move || {
                        state
                            .with(|s| s.field_error(field).map(str::to_owned))
                            .map(|msg| view! { <p class="auth-form__message">{msg}</p> })
                    }}
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="auth-form">
            <h1 class="auth-form__heading">{mode.heading()}</h1>

            <form class="auth-form__form" on:submit=handle_submit novalidate=true>
                {fields}

                {move || {
                    state
                        .with(|s| s.error().map(str::to_owned))
                        .map(|msg| view! { <div class="auth-form__error">{msg}</div> })
                }}

                <button class="auth-form__submit" type="submit" disabled=pending>
                    {mode.submit_label()}
                    <Show when=pending>
                        <span class="auth-form__spinner" aria-hidden="true"></span>
                    </Show>
                </button>
            </form>

            <div class="auth-form__switch">
                <span>
                    {mode.switch_prompt()}
                    <A href=mode.switch_href() attr:class="auth-form__link">
                        {mode.switch_label()}
                    </A>
                </span>
            </div>

            <button
                class="auth-form__oauth"
                type="button"
                on:click=move |_| api::oauth_sign_in(oauth_provider)
            >
                {oauth_label(oauth_provider)}
            </button>
        </div>
    }
}

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;
