use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info};
use speedread_core::settings::{PersistedSettings, SettingsStore};
use thiserror::Error;

const APP_DIR: &str = "speedread";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsFileError {
    #[error("no per-user config directory on this platform")]
    NoConfigDir,
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {path} is not valid settings JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// `PersistedSettings` as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/speedread/settings.json`.
    pub fn default_path() -> Result<PathBuf, SettingsFileError> {
        let base = dirs::config_dir().ok_or(SettingsFileError::NoConfigDir)?;
        Ok(base.join(APP_DIR).join(SETTINGS_FILE))
    }

    pub fn at_default_path() -> Result<Self, SettingsFileError> {
        Self::default_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SettingsFileError {
        SettingsFileError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> SettingsFileError {
        SettingsFileError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

impl SettingsStore for JsonSettingsStore {
    type Error = SettingsFileError;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("settings: no file at {}", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let settings = serde_json::from_str(&raw).map_err(|err| self.json_error(err))?;
        Ok(Some(settings))
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let json = serde_json::to_string_pretty(settings).map_err(|err| self.json_error(err))?;

        // Staged write, renamed over the previous file.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|err| self.io_error(err))?;
        fs::rename(&staging, &self.path).map_err(|err| self.io_error(err))?;

        info!(
            "settings: saved wpm={} highlight={} theme={:?}",
            settings.wpm,
            settings.highlight.label(),
            settings.theme
        );
        Ok(())
    }
}
