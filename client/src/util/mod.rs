//! Browser-facing helpers with SSR-safe fallbacks.

pub mod theme;
