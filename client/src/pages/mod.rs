//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped wiring (schema, defaults, action) and
//! delegates rendering details to `components`.

pub mod home;
pub mod sign_in;
pub mod sign_up;
