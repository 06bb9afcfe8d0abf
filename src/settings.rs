//! Session settings and their persisted store

use crate::error::{PairsError, PairsResult};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

fn default_true() -> bool {
    true
}

/// The four behavior toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub random_order: bool,
    #[serde(default = "default_true")]
    pub auto_listen: bool,
    #[serde(default = "default_true")]
    pub success_sound: bool,
    #[serde(default = "default_true")]
    pub hide_next_button: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            random_order: true,
            auto_listen: true,
            success_sound: true,
            hide_next_button: true,
        }
    }
}

/// Setting keys, named as in the persisted document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    RandomOrder,
    AutoListen,
    SuccessSound,
    HideNextButton,
}

impl Setting {
    pub const ALL: [Setting; 4] = [
        Setting::RandomOrder,
        Setting::AutoListen,
        Setting::SuccessSound,
        Setting::HideNextButton,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Setting::RandomOrder => "random_order",
            Setting::AutoListen => "auto_listen",
            Setting::SuccessSound => "success_sound",
            Setting::HideNextButton => "hide_next_button",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl Settings {
    pub fn get(&self, setting: Setting) -> bool {
        match setting {
            Setting::RandomOrder => self.random_order,
            Setting::AutoListen => self.auto_listen,
            Setting::SuccessSound => self.success_sound,
            Setting::HideNextButton => self.hide_next_button,
        }
    }

    pub fn set(&mut self, setting: Setting, value: bool) {
        let slot = match setting {
            Setting::RandomOrder => &mut self.random_order,
            Setting::AutoListen => &mut self.auto_listen,
            Setting::SuccessSound => &mut self.success_sound,
            Setting::HideNextButton => &mut self.hide_next_button,
        };
        *slot = value;
    }
}

/// Owns the settings and writes them back on every change.
///
/// A store without a path is in-memory only.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: Settings,
    path: Option<PathBuf>,
}

impl SettingsStore {
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            settings,
            path: None,
        }
    }

    /// Load from `path`, falling back to defaults when the file is absent or malformed
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match Self::read(&path) {
            Ok(Some(settings)) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Ok(None) => {
                debug!("No settings file at {:?}, using defaults", path);
                Settings::default()
            }
            Err(e @ PairsError::SettingsLoad(_)) => {
                warn!("⚠️ {}, using defaults", e);
                // Keep the broken file around for inspection
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(&path, &backup_path);
                Settings::default()
            }
            Err(e) => {
                warn!("⚠️ Could not read settings {:?}: {}, using defaults", path, e);
                Settings::default()
            }
        };
        Self {
            settings,
            path: Some(path),
        }
    }

    /// Load from the default per-user location
    pub fn load_default() -> Self {
        Self::load(settings_path())
    }

    fn read(path: &Path) -> PairsResult<Option<Settings>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| PairsError::SettingsLoad(format!("{:?}: {}", path, e)))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Change one toggle and persist immediately. The in-memory value only
    /// changes once the file is written.
    pub fn set(&mut self, setting: Setting, value: bool) -> PairsResult<()> {
        if self.settings.get(setting) == value {
            return Ok(());
        }
        let mut updated = self.settings;
        updated.set(setting, value);
        self.write(&updated)?;
        self.settings = updated;
        info!("⚙️ {} = {}", setting.key(), value);
        Ok(())
    }

    pub fn save(&self) -> PairsResult<()> {
        self.write(&self.settings)
    }

    /// Write settings atomically (temp file in the same directory, then rename)
    fn write(&self, settings: &Settings) -> PairsResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)?;
        let content = serde_json::to_string_pretty(settings)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| PairsError::Io(e.error))?;
        Ok(())
    }
}

pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paires-minimales")
        .join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        for setting in Setting::ALL {
            assert!(settings.get(setting), "{} should default on", setting.key());
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.json"));
        assert_eq!(*store.settings(), Settings::default());
    }

    #[test]
    fn test_partial_document_defaults_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "random_order": false }"#).unwrap();

        let store = SettingsStore::load(&path);
        assert!(!store.settings().random_order);
        assert!(store.settings().auto_listen);
        assert!(store.settings().success_sound);
        assert!(store.settings().hide_next_button);
    }

    #[test]
    fn test_corrupt_file_falls_back_and_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let store = SettingsStore::load(&path);
        assert_eq!(*store.settings(), Settings::default());
        assert!(!path.exists());
        assert!(dir.path().join("settings.json.corrupt").exists());
    }

    #[test]
    fn test_unreadable_path_is_not_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::create_dir(&path).unwrap();

        let store = SettingsStore::load(&path);
        assert_eq!(*store.settings(), Settings::default());
        assert!(path.is_dir());
        assert!(!dir.path().join("settings.json.corrupt").exists());
    }

    #[test]
    fn test_failed_save_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "plain file").unwrap();

        let mut store = SettingsStore::load(blocker.join("settings.json"));
        assert!(store.set(Setting::RandomOrder, false).is_err());
        assert!(store.settings().random_order);

        // The retry must try to write again rather than report success
        assert!(store.set(Setting::RandomOrder, false).is_err());
        assert!(store.settings().random_order);
    }

    #[test]
    fn test_toggle_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = SettingsStore::load(&path);
        store.set(Setting::AutoListen, false).unwrap();
        store.set(Setting::HideNextButton, false).unwrap();

        let reloaded = SettingsStore::load(&path);
        assert!(!reloaded.settings().auto_listen);
        assert!(!reloaded.settings().hide_next_button);
        assert!(reloaded.settings().random_order);
    }

    #[test]
    fn test_in_memory_never_writes() {
        let mut store = SettingsStore::in_memory(Settings::default());
        store.set(Setting::SuccessSound, false).unwrap();
        assert!(!store.settings().success_sound);
        assert!(store.path().is_none());
    }

    #[test]
    fn test_key_lookup() {
        assert_eq!(Setting::from_key("auto_listen"), Some(Setting::AutoListen));
        assert_eq!(Setting::from_key("volume"), None);
    }
}
