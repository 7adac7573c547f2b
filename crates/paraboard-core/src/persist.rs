//! Loading and saving [`Settings`].
//!
//! Settings are stored as a single JSON object. Reading is forgiving: a
//! missing, unparsable or invalid document silently yields
//! [`Settings::default`]. Writing is best effort and synchronous.

use crate::model::Model;
use crate::settings::Settings;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

/// Name under which settings are stored (the file stem for
/// [`JsonFileStore`]).
pub const SETTINGS_KEY: &str = "settings";

/// Errors raised while writing settings.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Reading or writing the backing file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Settings could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Somewhere settings survive between sessions.
pub trait SettingsStore {
    /// Read the stored settings, or the defaults if there are none usable.
    fn load(&self) -> Settings;

    /// Overwrite the stored settings.
    fn save(&mut self, settings: &Settings) -> Result<(), PersistError>;
}

/// Decode a stored document, falling back to defaults.
pub fn decode_settings(raw: Option<&str>) -> Settings {
    let Some(raw) = raw else {
        debug!(target: "paraboard::persist", "no stored settings, using defaults");
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(raw) {
        Ok(settings) => match settings.validate() {
            Ok(()) => settings,
            Err(err) => {
                warn!(target: "paraboard::persist", %err, "stored settings are invalid, using defaults");
                Settings::default()
            }
        },
        Err(err) => {
            warn!(target: "paraboard::persist", %err, "stored settings are malformed, using defaults");
            Settings::default()
        }
    }
}

/// Settings kept in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use the file at `path`. It does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/paraboard/settings.json`, if the platform has a config
    /// directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("paraboard").join(format!("{SETTINGS_KEY}.json")))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Settings {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => decode_settings(Some(&raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => decode_settings(None),
            Err(err) => {
                warn!(target: "paraboard::persist", path = %self.path.display(), %err, "cannot read settings, using defaults");
                Settings::default()
            }
        }
    }

    fn save(&mut self, settings: &Settings) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(settings)?;
        std::fs::write(&self.path, json)?;
        info!(target: "paraboard::persist", path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// In-memory store. Clones share the same document, so a test can keep one
/// handle and inspect what the application wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Arc<Mutex<Option<String>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStore {
    /// An empty store (loads the defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with a raw document, valid or not.
    pub fn with_document(raw: impl Into<String>) -> Self {
        let store = Self::default();
        *store.document.lock().unwrap_or_else(|e| e.into_inner()) = Some(raw.into());
        store
    }

    /// The raw stored document.
    pub fn document(&self) -> Option<String> {
        self.document.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// How many times [`SettingsStore::save`] has been called.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Settings {
        decode_settings(self.document().as_deref())
    }

    fn save(&mut self, settings: &Settings) -> Result<(), PersistError> {
        let json = serde_json::to_string(settings)?;
        *self.document.lock().unwrap_or_else(|e| e.into_inner()) = Some(json);
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}

/// Store subscriber that saves settings whenever their value changes.
///
/// The first model it observes is always saved, which writes the defaults
/// back on a first run.
pub struct SettingsPersister<S> {
    store: S,
    last: Option<Settings>,
}

impl<S: SettingsStore> SettingsPersister<S> {
    pub fn new(store: S) -> Self {
        Self { store, last: None }
    }

    /// Compare `model.settings` with the last saved value and save on change.
    pub fn observe(&mut self, model: &Model) {
        if self.last.as_ref() == Some(&model.settings) {
            return;
        }
        if let Err(err) = self.store.save(&model.settings) {
            error!(target: "paraboard::persist", %err, "failed to save settings");
        }
        self.last = Some(model.settings.clone());
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
