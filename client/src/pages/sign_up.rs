//! Sign-up page.

use leptos::prelude::*;

use crate::components::auth_form::AuthForm;
use crate::form::FormMode;
use crate::form::fields::SignUpValues;
use crate::form::schema::sign_up_schema;
use crate::form::submit::SubmitAction;
use crate::net::api;

#[component]
pub fn SignUpPage() -> impl IntoView {
    match sign_up_schema() {
        Ok(schema) => view! {
            <main class="auth-page">
                <AuthForm
                    mode=FormMode::SignUp
                    schema=schema
                    default_values=SignUpValues::default()
                    on_submit=SubmitAction::new(api::sign_up)
                />
            </main>
        }
        .into_any(),
        Err(e) => {
            log::error!("sign-up schema rejected: {e}");
            view! { <p class="auth-page__unavailable">"Sign-up is unavailable right now."</p> }.into_any()
        }
    }
}
