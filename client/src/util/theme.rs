//! Theme selection and application.
//!
//! Reads the stored preference from `localStorage`, resolves `system`
//! against `prefers-color-scheme`, and writes the result onto `<html>` as
//! a `light` / `dark` class.
//!
//! TRADE-OFFS
//! ==========
//! Browser access is hydrate-only; SSR paths resolve to the configured
//! default and never touch the DOM, keeping server output deterministic.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// User-selectable theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// Theme actually painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Explicit preference that flips the painted theme.
    #[must_use]
    pub const fn toggled(self) -> Theme {
        match self {
            Self::Light => Theme::Dark,
            Self::Dark => Theme::Light,
        }
    }
}

/// Static theme configuration applied by `Providers`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeConfig {
    pub default_theme: Theme,
    pub enable_system: bool,
    /// Suppress CSS transitions for the frame in which the theme flips.
    pub disable_transition_on_change: bool,
    pub storage_key: &'static str,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::Light,
            enable_system: true,
            disable_transition_on_change: true,
            storage_key: "theme",
        }
    }
}

impl ThemeConfig {
    /// Resolve a preference to a paintable theme.
    #[must_use]
    pub fn resolve(&self, preference: Theme, system_dark: bool) -> ResolvedTheme {
        match preference {
            Theme::Light => ResolvedTheme::Light,
            Theme::Dark => ResolvedTheme::Dark,
            Theme::System if self.enable_system && system_dark => ResolvedTheme::Dark,
            Theme::System => ResolvedTheme::Light,
        }
    }

    /// Interpret a stored preference, falling back to the default.
    #[must_use]
    pub fn preference_from(&self, stored: Option<&str>) -> Theme {
        match stored.and_then(Theme::parse) {
            Some(Theme::System) if !self.enable_system => self.default_theme,
            Some(theme) => theme,
            None => self.default_theme,
        }
    }

    /// Read the stored preference from localStorage.
    #[must_use]
    pub fn read_preference(&self) -> Theme {
        #[cfg(feature = "hydrate")]
        {
            let stored = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .and_then(|storage| storage.get_item(self.storage_key).ok().flatten());
            self.preference_from(stored.as_deref())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            self.preference_from(None)
        }
    }

    /// Resolve the stored preference and paint it.
    pub fn init(&self) -> ResolvedTheme {
        let resolved = self.resolve(self.read_preference(), system_prefers_dark());
        self.apply(resolved);
        resolved
    }

    /// Persist a new preference and paint it.
    pub fn set_theme(&self, theme: Theme) -> ResolvedTheme {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
                let _ = storage.set_item(self.storage_key, theme.as_str());
            }
        }
        let resolved = self.resolve(theme, system_prefers_dark());
        self.apply(resolved);
        resolved
    }

    /// Write the resolved theme onto `<html>`.
    pub fn apply(&self, resolved: ResolvedTheme) {
        #[cfg(feature = "hydrate")]
        {
            let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let guard = if self.disable_transition_on_change { suppress_transitions(&doc) } else { None };
            if let Some(el) = doc.document_element() {
                let classes = el.class_list();
                let _ = classes.remove_2("light", "dark");
                let _ = classes.add_1(resolved.as_str());
            }
            if let Some(style) = guard {
                gloo_timers::callback::Timeout::new(1, move || style.remove()).forget();
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = resolved;
        }
    }
}

/// Whether the browser reports a dark color-scheme preference.
#[must_use]
pub fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

#[cfg(feature = "hydrate")]
fn suppress_transitions(doc: &web_sys::Document) -> Option<web_sys::Element> {
    let style = doc.create_element("style").ok()?;
    style.set_text_content(Some("*,*::before,*::after{transition:none!important}"));
    doc.head()?.append_child(&style).ok()?;
    Some(style)
}
