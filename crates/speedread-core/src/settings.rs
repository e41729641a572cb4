//! Persisted user settings abstraction.

use serde::{Deserialize, Serialize};

use crate::render::{HighlightColor, Theme};

/// User-tunable settings that should survive restarts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PersistedSettings {
    pub wpm: u16,
    #[serde(default)]
    pub highlight: HighlightColor,
    #[serde(default)]
    pub theme: Theme,
}

impl PersistedSettings {
    pub const fn new(wpm: u16, highlight: HighlightColor, theme: Theme) -> Self {
        Self {
            wpm,
            highlight,
            theme,
        }
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}

/// Settings kept in memory only, for hosts without storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemorySettingsStore {
    saved: Option<PersistedSettings>,
}

impl MemorySettingsStore {
    pub const fn new() -> Self {
        Self { saved: None }
    }
}

impl SettingsStore for MemorySettingsStore {
    type Error = core::convert::Infallible;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        Ok(self.saved)
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        self.saved = Some(*settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_returns_last_save() {
        let mut store = MemorySettingsStore::new();
        assert_eq!(store.load(), Ok(None));

        let settings = PersistedSettings::new(420, HighlightColor::Yellow, Theme::Dark);
        store.save(&settings).unwrap();
        assert_eq!(store.load(), Ok(Some(settings)));
    }

    #[test]
    fn json_shape_is_stable() {
        let settings = PersistedSettings::new(300, HighlightColor::Green, Theme::Light);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"wpm":300,"highlight":"green","theme":"light"}"#);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: PersistedSettings = serde_json::from_str(r#"{"wpm":250}"#).unwrap();
        assert_eq!(
            settings,
            PersistedSettings::new(250, HighlightColor::Red, Theme::Light)
        );
    }
}
