use std::sync::Arc;

use selcard_config::Messages;
use selcard_settings::{SettingsError, SettingsStore};
use selcard_types::UiCommand;

pub const TOGGLE_MENU_ID: &str = "toggle-translation";

/// Context-menu toggle for the translation flag
pub struct MenuController {
    store: Arc<dyn SettingsStore>,
    messages: Messages,
}

impl MenuController {
    pub fn new(store: Arc<dyn SettingsStore>, messages: Messages) -> Self {
        Self { store, messages }
    }

    /// Recreate the single menu item; run on install and on startup
    pub fn init(&self) -> Vec<UiCommand> {
        let enabled = self.store.get();
        tracing::info!("Initializing menu, translation enabled: {}", enabled);
        vec![UiCommand::RemoveMenus, self.label_command(enabled)]
    }

    /// Flip the flag for clicks on our item and return the new value.
    /// Other items are ignored. Relabelling follows the store notification.
    pub fn on_click(&self, item_id: &str) -> Result<Option<bool>, SettingsError> {
        if item_id != TOGGLE_MENU_ID {
            tracing::debug!("Ignoring click on menu item {}", item_id);
            return Ok(None);
        }

        let enabled = !self.store.get();
        self.store.set(enabled)?;
        tracing::info!("Translation toggled from menu: {}", enabled);

        Ok(Some(enabled))
    }

    /// Relabel after the flag changed
    pub fn on_settings_changed(&self, enabled: bool) -> UiCommand {
        self.label_command(enabled)
    }

    fn label_command(&self, enabled: bool) -> UiCommand {
        UiCommand::SetMenu {
            id: TOGGLE_MENU_ID.to_string(),
            label: self.messages.menu_label(enabled).to_string(),
        }
    }
}
