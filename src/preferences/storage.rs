//! Persisted preference storage

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::errors::PreferenceResult;
use super::theme::Theme;

/// Where the theme preference is persisted
pub trait PreferenceStorage: Send + Sync {
    /// Saved theme, `None` if nothing was saved yet
    fn load_theme(&self) -> PreferenceResult<Option<Theme>>;

    fn save_theme(&self, theme: Theme) -> PreferenceResult<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default)]
    theme: Option<Theme>,
}

/// Preferences kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FilePreferenceStorage {
    path: PathBuf,
}

impl FilePreferenceStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStorage for FilePreferenceStorage {
    fn load_theme(&self) -> PreferenceResult<Option<Theme>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: PreferenceFile = serde_json::from_str(&text)?;
        Ok(file.theme)
    }

    fn save_theme(&self, theme: Theme) -> PreferenceResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&PreferenceFile { theme: Some(theme) })?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Preferences held in process only
#[derive(Debug, Default)]
pub struct MemoryPreferenceStorage {
    theme: Mutex<Option<Theme>>,
}

impl MemoryPreferenceStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(Some(theme)),
        }
    }
}

impl PreferenceStorage for MemoryPreferenceStorage {
    fn load_theme(&self) -> PreferenceResult<Option<Theme>> {
        Ok(*self.theme.lock().unwrap_or_else(|p| p.into_inner()))
    }

    fn save_theme(&self, theme: Theme) -> PreferenceResult<()> {
        *self.theme.lock().unwrap_or_else(|p| p.into_inner()) = Some(theme);
        Ok(())
    }
}
