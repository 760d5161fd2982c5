use std::sync::Arc;

use selcard_config::Config;
use selcard_core::TrackedSelection;
use selcard_settings::SettingsStore;

pub struct AppState {
    pub config: Config,
    pub settings: Arc<dyn SettingsStore>,
    /// Updated straight from the bridge reader, read after the debounce
    pub selection: Arc<TrackedSelection>,
}

impl AppState {
    pub fn new(config: Config, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            config,
            settings,
            selection: Arc::new(TrackedSelection::new()),
        }
    }
}
