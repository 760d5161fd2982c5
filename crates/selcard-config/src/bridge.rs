use serde::{Deserialize, Serialize};

fn default_ws_url() -> String {
    "ws://127.0.0.1:9417".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BridgeConfig {
    /// WebSocket endpoint exposed by the page script host
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
        }
    }
}
