//! Network access to the auth service.

pub mod api;
