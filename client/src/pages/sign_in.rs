//! Sign-in page: email + password, or OAuth.

use leptos::prelude::*;

use crate::components::auth_form::AuthForm;
use crate::form::FormMode;
use crate::form::fields::SignInValues;
use crate::form::schema::sign_in_schema;
use crate::form::submit::SubmitAction;
use crate::net::api;

#[component]
pub fn SignInPage() -> impl IntoView {
    match sign_in_schema() {
        Ok(schema) => view! {
            <main class="auth-page">
                <AuthForm
                    mode=FormMode::SignIn
                    schema=schema
                    default_values=SignInValues::default()
                    on_submit=SubmitAction::new(api::sign_in_with_credentials)
                />
            </main>
        }
        .into_any(),
        Err(e) => {
            log::error!("sign-in schema rejected: {e}");
            view! { <p class="auth-page__unavailable">"Sign-in is unavailable right now."</p> }.into_any()
        }
    }
}
