use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_audio_url() -> String {
    "https://dict.youdao.com/dictvoice".to_string()
}

fn default_voice_type() -> u8 {
    2
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct PronunciationConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_audio_url")]
    pub audio_url: String,
    /// Youdao voice: 1 = British, 2 = American
    #[serde(default = "default_voice_type")]
    pub voice_type: u8,
}

impl Default for PronunciationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            audio_url: default_audio_url(),
            voice_type: default_voice_type(),
        }
    }
}
