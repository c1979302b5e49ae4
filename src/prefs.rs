use crate::app_dirs::AppDirs;
use crate::config::Difficulty;
use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Saved defaults. Anything given on the command line takes priority.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub difficulty: Option<Difficulty>,
    pub language: Option<Locale>,
    pub proximity: bool,
}

pub trait PreferencesStore {
    fn load(&self) -> Preferences;
    fn save(&self, prefs: &Preferences) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FilePreferencesStore {
    path: PathBuf,
}

impl FilePreferencesStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::preferences_path().unwrap_or_else(|| PathBuf::from("guessnum_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FilePreferencesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferencesStore for FilePreferencesStore {
    fn load(&self) -> Preferences {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Preferences>(&bytes) {
                Ok(prefs) => return prefs,
                Err(e) => tracing::warn!(error = %e, path = %self.path.display(), "ignoring malformed preferences"),
            }
        }
        Preferences::default()
    }

    fn save(&self, prefs: &Preferences) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(prefs)?;
        fs::write(&self.path, data)
    }
}
