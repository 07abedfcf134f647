//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `providers` wraps the app in session and theme context; `auth_form` is the
//! one form every auth page renders; `theme_toggle` flips the painted theme.

pub mod auth_form;
pub mod providers;
pub mod theme_toggle;
