//! Theme Switcher
//!
//! Two-valued UI theme persisted under its own storage key. The active theme
//! drives the root `data-theme` attribute and exactly one of the two toggle
//! indicators.

use crate::storage::{KeyValueStore, StorageResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage key holding the theme
pub const THEME_KEY: &str = "theme";

/// Attribute on the document root read by the stylesheets
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}. Use: light, dark", other)),
        }
    }
}

/// Active/inactive state of the two theme buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeToggles {
    pub light_active: bool,
    pub dark_active: bool,
}

impl From<Theme> for ThemeToggles {
    fn from(theme: Theme) -> Self {
        Self {
            light_active: theme == Theme::Light,
            dark_active: theme == Theme::Dark,
        }
    }
}

/// Persisted theme preference
pub struct ThemeSwitcher<S: KeyValueStore> {
    store: S,
    current: Theme,
}

impl<S: KeyValueStore> ThemeSwitcher<S> {
    /// Read the stored theme, defaulting to light
    pub fn load(store: S) -> StorageResult<Self> {
        let current = match store.get(THEME_KEY)? {
            None => Theme::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
        };

        Ok(Self { store, current })
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Attribute name/value for the document root
    pub fn root_attribute(&self) -> (&'static str, &'static str) {
        (THEME_ATTRIBUTE, self.current.as_str())
    }

    pub fn toggles(&self) -> ThemeToggles {
        self.current.into()
    }

    /// Apply and persist `theme`
    pub fn set(&mut self, theme: Theme) -> StorageResult<()> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.current = theme;
        tracing::debug!(%theme, "Theme set");
        Ok(())
    }

    /// Switch to the other theme and return it
    pub fn toggle(&mut self) -> StorageResult<Theme> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_to_light() {
        let store = MemoryStore::new();
        let switcher = ThemeSwitcher::load(&store).unwrap();
        assert_eq!(switcher.current(), Theme::Light);
        assert_eq!(switcher.root_attribute(), ("data-theme", "light"));
        assert_eq!(
            switcher.toggles(),
            ThemeToggles {
                light_active: true,
                dark_active: false
            }
        );
    }

    #[test]
    fn test_unknown_stored_value_falls_back() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "sepia").unwrap();
        let switcher = ThemeSwitcher::load(&store).unwrap();
        assert_eq!(switcher.current(), Theme::Light);
    }

    #[test]
    fn test_set_dark_twice_is_idempotent() {
        let store = MemoryStore::new();
        let mut switcher = ThemeSwitcher::load(&store).unwrap();

        switcher.set(Theme::Dark).unwrap();
        switcher.set(Theme::Dark).unwrap();

        assert_eq!(switcher.current(), Theme::Dark);
        assert_eq!(switcher.root_attribute(), ("data-theme", "dark"));
        let toggles = switcher.toggles();
        assert!(toggles.dark_active);
        assert!(!toggles.light_active);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let store = MemoryStore::new();
        let mut switcher = ThemeSwitcher::load(&store).unwrap();
        let original = switcher.current();

        assert_eq!(switcher.toggle().unwrap(), Theme::Dark);
        assert_eq!(switcher.toggle().unwrap(), original);
        assert_eq!(switcher.toggles(), ThemeToggles::from(original));
    }

    #[test]
    fn test_persisted_theme_is_read_on_load() {
        let store = MemoryStore::new();
        ThemeSwitcher::load(&store)
            .unwrap()
            .set(Theme::Dark)
            .unwrap();

        let reloaded = ThemeSwitcher::load(&store).unwrap();
        assert_eq!(reloaded.current(), Theme::Dark);
    }

    #[test]
    fn test_toggles_are_exclusive() {
        for theme in [Theme::Light, Theme::Dark] {
            let t = ThemeToggles::from(theme);
            assert!(t.light_active ^ t.dark_active);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light\n".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }
}
