use serde::{Deserialize, Serialize};

fn default_margin() -> f64 {
    10.0
}

fn default_card_width() -> f64 {
    380.0
}

fn default_card_height() -> f64 {
    150.0
}

/// Assumed card footprint used for viewport clamping
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Matches the card's CSS max-width
    #[serde(default = "default_card_width")]
    pub card_width: f64,
    #[serde(default = "default_card_height")]
    pub card_height: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            card_width: default_card_width(),
            card_height: default_card_height(),
        }
    }
}
