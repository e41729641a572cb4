use core::fmt::Display;

use log::{debug, warn};
use speedread_core::settings::{PersistedSettings, SettingsStore};

use super::SETTINGS_SAVE_DEBOUNCE_MS;

pub(super) struct SettingsSyncState {
    last_saved: PersistedSettings,
    pending: Option<(PersistedSettings, u64)>,
}

impl SettingsSyncState {
    pub(super) fn new(initial: PersistedSettings) -> Self {
        Self {
            last_saved: initial,
            pending: None,
        }
    }

    pub(super) fn track_current(&mut self, current: PersistedSettings, now_ms: u64) {
        if current == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, changed_at_ms)) => {
                if *pending != current {
                    *pending = current;
                    *changed_at_ms = now_ms;
                }
            }
            None => {
                self.pending = Some((current, now_ms));
            }
        }
    }

    pub(super) fn flush_if_due<S>(&mut self, store: Option<&mut S>, now_ms: u64)
    where
        S: SettingsStore,
        S::Error: Display,
    {
        let Some((_, changed_at_ms)) = self.pending else {
            return;
        };

        if now_ms.saturating_sub(changed_at_ms) < SETTINGS_SAVE_DEBOUNCE_MS {
            return;
        }

        self.save_pending(store, now_ms);
    }

    /// Save whatever is pending, ignoring the debounce window.
    fn flush_now<S>(&mut self, store: Option<&mut S>)
    where
        S: SettingsStore,
        S::Error: Display,
    {
        if let Some((_, changed_at_ms)) = self.pending {
            self.save_pending(store, changed_at_ms);
        }
    }

    /// Record `current` and save it right away; used on every exit path.
    pub(super) fn flush_on_exit<S>(&mut self, current: PersistedSettings, store: Option<&mut S>)
    where
        S: SettingsStore,
        S::Error: Display,
    {
        self.track_current(current, 0);
        self.flush_now(store);
    }

    fn save_pending<S>(&mut self, store: Option<&mut S>, now_ms: u64)
    where
        S: SettingsStore,
        S::Error: Display,
    {
        let Some((candidate, _)) = self.pending else {
            return;
        };

        match store {
            Some(store) => match store.save(&candidate) {
                Ok(()) => {
                    debug!("settings-sync: saved wpm={}", candidate.wpm);
                    self.last_saved = candidate;
                    self.pending = None;
                }
                Err(err) => {
                    // Retry after another debounce window.
                    warn!("settings-sync: save failed: {}", err);
                    self.pending = Some((candidate, now_ms));
                }
            },
            None => {
                self.last_saved = candidate;
                self.pending = None;
            }
        }
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
