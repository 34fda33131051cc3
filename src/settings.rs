//! User preferences, theme and admin mode

use crate::error::{Result, VocabError};
use crate::store::LocalStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stored settings are layered over these defaults field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub audio_enabled: bool,
    pub dark_mode: bool,
    pub auto_refresh: bool,
    pub notifications_enabled: bool,
    pub animations_enabled: bool,
    pub compact_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audio_enabled: true,
            dark_mode: false,
            auto_refresh: true,
            notifications_enabled: true,
            animations_enabled: true,
            compact_mode: false,
        }
    }
}

impl Settings {
    pub const KEYS: [&'static str; 6] = [
        "audioEnabled",
        "darkMode",
        "autoRefresh",
        "notificationsEnabled",
        "animationsEnabled",
        "compactMode",
    ];

    pub fn get(&self, key: &str) -> Result<bool> {
        Ok(*self.field(key)?)
    }

    pub fn set(&mut self, key: &str, value: bool) -> Result<()> {
        *self.field_mut(key)? = value;
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, bool)> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get(key).ok().map(|value| (*key, value)))
            .collect()
    }

    fn field(&self, key: &str) -> Result<&bool> {
        match key {
            "audioEnabled" => Ok(&self.audio_enabled),
            "darkMode" => Ok(&self.dark_mode),
            "autoRefresh" => Ok(&self.auto_refresh),
            "notificationsEnabled" => Ok(&self.notifications_enabled),
            "animationsEnabled" => Ok(&self.animations_enabled),
            "compactMode" => Ok(&self.compact_mode),
            _ => Err(VocabError::UnknownSetting(key.to_string())),
        }
    }

    fn field_mut(&mut self, key: &str) -> Result<&mut bool> {
        match key {
            "audioEnabled" => Ok(&mut self.audio_enabled),
            "darkMode" => Ok(&mut self.dark_mode),
            "autoRefresh" => Ok(&mut self.auto_refresh),
            "notificationsEnabled" => Ok(&mut self.notifications_enabled),
            "animationsEnabled" => Ok(&mut self.animations_enabled),
            "compactMode" => Ok(&mut self.compact_mode),
            _ => Err(VocabError::UnknownSetting(key.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(VocabError::UnknownSetting(format!("theme {}", other))),
        }
    }
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Settings, theme and admin flag persisted in the local store
pub struct Preferences {
    store: LocalStore,
}

impl Preferences {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn settings(&self) -> Settings {
        self.store.load_settings()
    }

    pub fn value(&self, key: &str) -> Result<bool> {
        self.settings().get(key)
    }

    pub fn update(&self, key: &str, value: bool) -> Result<Settings> {
        let mut settings = self.settings();
        settings.set(key, value)?;
        self.store.save_settings(&settings)?;
        if key == "darkMode" {
            self.store
                .save_theme(if value { Theme::Dark } else { Theme::Light })?;
        }
        Ok(settings)
    }

    /// Saved theme, falling back to the `darkMode` setting
    pub fn theme(&self) -> Theme {
        self.store.load_theme().unwrap_or_else(|| {
            if self.settings().dark_mode {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.store.save_theme(theme)?;
        let mut settings = self.settings();
        settings.dark_mode = theme == Theme::Dark;
        self.store.save_settings(&settings)
    }

    pub fn is_admin(&self) -> bool {
        self.store.is_admin()
    }

    pub fn set_admin(&self, enabled: bool) -> Result<()> {
        self.store.set_admin(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_settings_layer_over_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"compactMode": true}"#).unwrap();
        assert!(settings.compact_mode);
        assert!(settings.audio_enabled);
        assert!(settings.auto_refresh);
    }

    #[test]
    fn test_set_by_name() {
        let mut settings = Settings::default();
        settings.set("audioEnabled", false).unwrap();
        assert!(!settings.get("audioEnabled").unwrap());
        assert!(matches!(
            settings.set("volume", true),
            Err(VocabError::UnknownSetting(_))
        ));
        assert_eq!(settings.entries().len(), Settings::KEYS.len());
    }

    #[test]
    fn test_theme_updates_dark_mode() {
        let prefs = Preferences::new(LocalStore::in_memory());
        assert_eq!(prefs.theme(), Theme::Light);
        prefs.set_theme(Theme::Dark).unwrap();
        assert_eq!(prefs.theme(), Theme::Dark);
        assert!(prefs.settings().dark_mode);

        prefs.update("darkMode", false).unwrap();
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
