//! Auth-form model: field tables, schemas, submission state machine.
//!
//! ARCHITECTURE
//! ============
//! Everything here is framework-free apart from the `RwSignal` store impl,
//! so the behavior the `AuthForm` component relies on is unit-testable
//! without mounting a view.


pub mod fields;
pub mod result;
pub mod schema;
pub mod state;
pub mod submit;

/// Which auth flow a form drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    SignIn,
    SignUp,
}

impl FormMode {
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::SignIn => "Welcome back!",
            Self::SignUp => "Create your account",
        }
    }

    #[must_use]
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Login to your Account",
            Self::SignUp => "Create an Account",
        }
    }

    /// Prompt preceding the link to the other flow.
    #[must_use]
    pub const fn switch_prompt(self) -> &'static str {
        match self {
            Self::SignIn => "Don't have an account? ",
            Self::SignUp => "Have an account? ",
        }
    }

    #[must_use]
    pub const fn switch_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign up",
            Self::SignUp => "Sign in",
        }
    }

    #[must_use]
    pub const fn switch_href(self) -> &'static str {
        match self {
            Self::SignIn => "/sign-up",
            Self::SignUp => "/sign-in",
        }
    }
}
