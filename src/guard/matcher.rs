//! Which paths the edge guard looks at.
//!
//! Everything is intercepted except paths whose text after the leading `/`
//! starts with an excluded prefix. The test is a raw string prefix, so
//! `/apiary` is excluded along with `/api/...`.

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;

pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["api", "pkg", "favicon.ico"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMatcher {
    excluded: Vec<String>,
}

impl Default for RequestMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl RequestMatcher {
    /// Empty prefixes are dropped; they would exclude every path.
    #[must_use]
    pub fn new(excluded: Vec<String>) -> Self {
        let excluded = excluded.into_iter().filter(|prefix| !prefix.is_empty()).collect();
        Self { excluded }
    }

    /// Whether the guard should run for `path`.
    #[must_use]
    pub fn intercepts(&self, path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        !self.excluded.iter().any(|prefix| rest.starts_with(prefix.as_str()))
    }
}
