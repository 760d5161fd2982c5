use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "selcard-settings.json".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SettingsConfig {
    /// JSON file holding the persisted toggle
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
