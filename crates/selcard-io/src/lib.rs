pub mod player;
pub mod ws;

pub use player::BridgePlayer;
pub use ws::{BridgeError, PageBridge, start_page_bridge};
