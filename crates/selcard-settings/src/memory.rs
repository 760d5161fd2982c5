use std::sync::atomic::{AtomicBool, Ordering};

use crate::listeners::Listeners;
use crate::{DEFAULT_ENABLED, Listener, ListenerId, SettingsError, SettingsStore};

/// Non-persistent store, also the in-process half of [`crate::FileSettings`]
pub struct MemorySettings {
    enabled: AtomicBool,
    listeners: Listeners,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::with_value(DEFAULT_ENABLED)
    }

    pub fn with_value(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            listeners: Listeners::default(),
        }
    }

    /// Swap the value, returning whether it changed. Does not notify.
    pub(crate) fn replace(&self, enabled: bool) -> bool {
        self.enabled.swap(enabled, Ordering::SeqCst) != enabled
    }

    pub(crate) fn notify(&self, enabled: bool) {
        self.listeners.notify(enabled);
    }
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set(&self, enabled: bool) -> Result<(), SettingsError> {
        if self.replace(enabled) {
            self.notify(enabled);
        }
        Ok(())
    }

    fn on_change(&self, listener: Listener) -> ListenerId {
        self.listeners.add(listener)
    }

    fn off_change(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<bool>>>, Listener) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let listener: Listener = Arc::new(move |v| seen_clone.lock().unwrap().push(v));
        (seen, listener)
    }

    #[test]
    fn defaults_to_enabled() {
        assert!(MemorySettings::new().get());
    }

    #[test]
    fn set_notifies_every_listener_with_new_value() {
        let store = MemorySettings::new();
        let (first, l1) = recorder();
        let (second, l2) = recorder();
        store.on_change(l1);
        store.on_change(l2);

        store.set(false).unwrap();

        assert!(!store.get());
        assert_eq!(*first.lock().unwrap(), vec![false]);
        assert_eq!(*second.lock().unwrap(), vec![false]);
    }

    #[test]
    fn unchanged_value_does_not_notify() {
        let store = MemorySettings::new();
        let (seen, listener) = recorder();
        store.on_change(listener);

        store.set(true).unwrap();

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn off_change_stops_notifications() {
        let store = MemorySettings::new();
        let (seen, listener) = recorder();
        let id = store.on_change(listener);

        assert!(store.off_change(id));
        assert!(!store.off_change(id));
        store.set(false).unwrap();

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn listener_may_read_store_reentrantly() {
        let store = Arc::new(MemorySettings::new());
        let observed = Arc::new(Mutex::new(None));
        {
            let store_clone = store.clone();
            let observed = observed.clone();
            store.on_change(Arc::new(move |_| {
                *observed.lock().unwrap() = Some(store_clone.get());
            }));
        }

        store.set(false).unwrap();

        assert_eq!(*observed.lock().unwrap(), Some(false));
    }
}
