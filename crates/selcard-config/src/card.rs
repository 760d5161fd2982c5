use serde::{Deserialize, Serialize};

fn default_debounce_ms() -> u64 {
    100
}

fn default_min_selection_chars() -> usize {
    1
}

fn default_anchor_offset_x() -> f64 {
    0.0
}

fn default_anchor_offset_y() -> f64 {
    20.0
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct CardConfig {
    /// Wait before re-reading the selection after mouse-up
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Shortest trimmed selection (in chars) that opens a card
    #[serde(default = "default_min_selection_chars")]
    pub min_selection_chars: usize,
    #[serde(default = "default_anchor_offset_x")]
    pub anchor_offset_x: f64,
    #[serde(default = "default_anchor_offset_y")]
    pub anchor_offset_y: f64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_selection_chars: default_min_selection_chars(),
            anchor_offset_x: default_anchor_offset_x(),
            anchor_offset_y: default_anchor_offset_y(),
        }
    }
}
