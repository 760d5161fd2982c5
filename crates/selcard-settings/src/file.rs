use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::memory::MemorySettings;
use crate::{
    DEFAULT_ENABLED, Listener, ListenerId, SettingsError, SettingsStore, TRANSLATION_ENABLED_KEY,
};

/// Store persisted as a JSON object on disk
pub struct FileSettings {
    path: PathBuf,
    inner: MemorySettings,
    write_lock: Mutex<()>,
}

impl FileSettings {
    /// Open the store; a missing or corrupt file falls back to the default
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let enabled = match read_flag(&path) {
            Ok(Some(enabled)) => enabled,
            Ok(None) => DEFAULT_ENABLED,
            Err(e) => {
                tracing::warn!("Ignoring settings file {}: {}", path.display(), e);
                DEFAULT_ENABLED
            }
        };
        tracing::info!(
            "Loaded settings from {}: {}={}",
            path.display(),
            TRANSLATION_ENABLED_KEY,
            enabled
        );

        Self {
            path,
            inner: MemorySettings::with_value(enabled),
            write_lock: Mutex::new(()),
        }
    }

    /// Caller holds `write_lock`
    fn persist(&self, enabled: bool) -> Result<(), SettingsError> {
        // Keep unrelated keys written by other tools
        let mut object = match read_object(&self.path) {
            Ok(object) => object,
            Err(e) => {
                tracing::warn!("Overwriting unreadable settings file: {}", e);
                Map::new()
            }
        };
        object.insert(TRANSLATION_ENABLED_KEY.to_string(), Value::Bool(enabled));

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(object))?)?;
        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn get(&self) -> bool {
        self.inner.get()
    }

    /// File, memory and notification order stay in step across threads.
    /// Listeners run under the write lock and must not call `set` themselves.
    fn set(&self, enabled: bool) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.persist(enabled)?;
        if self.inner.replace(enabled) {
            self.inner.notify(enabled);
        }
        Ok(())
    }

    fn on_change(&self, listener: Listener) -> ListenerId {
        self.inner.on_change(listener)
    }

    fn off_change(&self, id: ListenerId) -> bool {
        self.inner.off_change(id)
    }
}

fn read_object(path: &Path) -> Result<Map<String, Value>, SettingsError> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Map::new());
    }
    Ok(serde_json::from_str(&data)?)
}

fn read_flag(path: &Path) -> Result<Option<bool>, SettingsError> {
    let object = read_object(path)?;
    Ok(object.get(TRANSLATION_ENABLED_KEY).and_then(Value::as_bool))
}
