mod file;
mod listeners;
mod memory;

pub use file::FileSettings;
pub use listeners::{Listener, ListenerId};
pub use memory::MemorySettings;

/// Name of the persisted toggle
pub const TRANSLATION_ENABLED_KEY: &str = "translationEnabled";

/// Value used when the flag was never written
pub const DEFAULT_ENABLED: bool = true;

/// Process-wide "translation enabled" flag shared by every context
pub trait SettingsStore: Send + Sync {
    /// Current value, `true` if never set
    fn get(&self) -> bool;

    /// Replace the value and notify every listener if it changed
    fn set(&self, enabled: bool) -> Result<(), SettingsError>;

    /// Subscribe to changes; the listener receives the new value
    fn on_change(&self, listener: Listener) -> ListenerId;

    /// Returns false if the id was not subscribed
    fn off_change(&self, id: ListenerId) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    JsonError(#[from] serde_json::Error),
}
