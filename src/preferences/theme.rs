//! # Theme Store
//!
//! Holds the light/dark theme preference. The store is constructed
//! explicitly and handed to whoever needs it.
//!
//! ## Invariants
//! - `load` runs once at startup: a saved preference wins, otherwise the
//!   system default is used
//! - Changes made before `load` are not persisted
//! - Every change is broadcast to subscribers
//! - Changes are serialized: a toggle reads, persists and publishes under
//!   one lock, so concurrent toggles never collapse into one

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::errors::{PreferenceError, PreferenceResult};
use super::storage::PreferenceStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Self {
        Self::from_dark(!self.is_dark())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(PreferenceError::UnknownTheme(s.to_string())),
        }
    }
}

/// Injectable theme preference store
pub struct ThemeStore {
    storage: Box<dyn PreferenceStorage>,
    sender: watch::Sender<Theme>,
    loaded: AtomicBool,
    writes: Mutex<()>,
}

impl ThemeStore {
    /// Create a store starting at the light theme. Call `load` before use.
    pub fn new(storage: Box<dyn PreferenceStorage>) -> Self {
        let (sender, _) = watch::channel(Theme::Light);
        Self {
            storage,
            sender,
            loaded: AtomicBool::new(false),
            writes: Mutex::new(()),
        }
    }

    /// Load the saved preference, falling back to the system default.
    ///
    /// Later calls return the current theme without touching storage.
    pub fn load(&self, system_prefers_dark: bool) -> PreferenceResult<Theme> {
        let _guard = self.write_guard();
        if self.loaded.load(Ordering::Acquire) {
            return Ok(self.get());
        }

        let theme = self
            .storage
            .load_theme()?
            .unwrap_or_else(|| Theme::from_dark(system_prefers_dark));

        self.sender.send_replace(theme);
        self.loaded.store(true, Ordering::Release);
        tracing::debug!(%theme, "theme preference loaded");
        Ok(theme)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn get(&self) -> Theme {
        *self.sender.borrow()
    }

    /// Change the theme, persisting it once loaded
    pub fn set(&self, theme: Theme) -> PreferenceResult<Theme> {
        let _guard = self.write_guard();
        self.apply(theme)
    }

    /// Flip between light and dark
    pub fn toggle(&self) -> PreferenceResult<Theme> {
        let _guard = self.write_guard();
        self.apply(self.get().toggled())
    }

    // Caller holds the write guard.
    fn apply(&self, theme: Theme) -> PreferenceResult<Theme> {
        if self.is_loaded() {
            self.storage.save_theme(theme)?;
        }
        self.sender.send_replace(theme);
        Ok(theme)
    }

    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Receiver notified on every change
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::storage::MemoryPreferenceStorage;
    use std::sync::Arc;

    struct SharedStorage(Arc<MemoryPreferenceStorage>);

    impl PreferenceStorage for SharedStorage {
        fn load_theme(&self) -> PreferenceResult<Option<Theme>> {
            self.0.load_theme()
        }

        fn save_theme(&self, theme: Theme) -> PreferenceResult<()> {
            self.0.save_theme(theme)
        }
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }

    #[test]
    fn test_load_prefers_saved() {
        let store = ThemeStore::new(Box::new(MemoryPreferenceStorage::with_theme(Theme::Dark)));
        assert_eq!(store.load(false).unwrap(), Theme::Dark);
    }

    #[test]
    fn test_load_falls_back_to_system() {
        let store = ThemeStore::new(Box::new(MemoryPreferenceStorage::new()));
        assert_eq!(store.load(true).unwrap(), Theme::Dark);

        let store = ThemeStore::new(Box::new(MemoryPreferenceStorage::new()));
        assert_eq!(store.load(false).unwrap(), Theme::Light);
    }

    #[test]
    fn test_set_before_load_not_persisted() {
        let shared = Arc::new(MemoryPreferenceStorage::new());
        let store = ThemeStore::new(Box::new(SharedStorage(shared.clone())));

        store.set(Theme::Dark).unwrap();
        assert_eq!(store.get(), Theme::Dark);
        assert_eq!(shared.load_theme().unwrap(), None);

        store.load(false).unwrap();
        store.toggle().unwrap();
        assert_eq!(shared.load_theme().unwrap(), Some(Theme::Dark));
    }

    #[test]
    fn test_load_runs_once() {
        let store = ThemeStore::new(Box::new(MemoryPreferenceStorage::new()));
        store.load(false).unwrap();
        store.set(Theme::Dark).unwrap();
        assert_eq!(store.load(false).unwrap(), Theme::Dark);
    }

    #[test]
    fn test_concurrent_toggles_all_apply() {
        let shared = Arc::new(MemoryPreferenceStorage::new());
        let store = Arc::new(ThemeStore::new(Box::new(SharedStorage(shared.clone()))));
        store.load(false).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.toggle().unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 200 flips from light end on light
        assert_eq!(store.get(), Theme::Light);
        assert_eq!(shared.load_theme().unwrap(), Some(Theme::Light));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = ThemeStore::new(Box::new(MemoryPreferenceStorage::new()));
        store.load(false).unwrap();
        let mut rx = store.subscribe();

        store.toggle().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Theme::Dark);
    }
}
