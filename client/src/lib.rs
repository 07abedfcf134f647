//! # client
//!
//! Leptos frontend for the authentication pages: a schema-driven sign-in /
//! sign-up form, session and theme providers, and the routes that host them.
//!
//! The `form` module holds the framework-free model (fields, schemas,
//! submission state machine); `components` binds it to the DOM.

pub mod app;
pub mod components;
pub mod form;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
