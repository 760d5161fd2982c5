use std::env;

use serde::{Deserialize, Serialize};

use self::bridge::BridgeConfig;
use self::card::CardConfig;
use self::drag::DragConfig;
use self::messages::Locale;
use self::pronunciation::PronunciationConfig;
use self::settings::SettingsConfig;
use self::translator::TranslatorConfig;

pub mod bridge;
pub mod card;
pub mod drag;
pub mod messages;
pub mod pronunciation;
pub mod settings;
pub mod translator;

pub use messages::Messages;

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub card: CardConfig,
    pub drag: DragConfig,
    pub translator: TranslatorConfig,
    pub pronunciation: PronunciationConfig,
    pub settings: SettingsConfig,
    pub bridge: BridgeConfig,
    pub locale: Locale,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let mut config = Config::default();

        if let Some(ms) = env_parse("SELCARD_DEBOUNCE_MS") {
            config.card.debounce_ms = ms;
        }
        if let Some(chars) = env_parse("SELCARD_MIN_SELECTION_CHARS") {
            config.card.min_selection_chars = chars;
        }
        if let Ok(url) = env::var("SELCARD_TRANSLATE_URL") {
            config.translator.api_url = url;
        }
        if let Ok(key) = env::var("SELCARD_CLIENT_KEY") {
            config.translator.client_key = key;
        }
        if let Ok(url) = env::var("SELCARD_AUDIO_URL") {
            config.pronunciation.audio_url = url;
        }
        if let Some(enabled) = env_parse("SELCARD_PRONUNCIATION") {
            config.pronunciation.enabled = enabled;
        }
        if let Ok(path) = env::var("SELCARD_SETTINGS_PATH") {
            config.settings.path = path;
        }
        if let Ok(url) = env::var("SELCARD_WS_URL") {
            config.bridge.ws_url = url;
        }
        if let Some(locale) = env::var("SELCARD_LOCALE")
            .ok()
            .and_then(|v| Locale::parse(&v))
        {
            config.locale = locale;
        }

        config
    }

    pub fn messages(&self) -> Messages {
        Messages::for_locale(self.locale)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config.card.debounce_ms, 100);
        assert_eq!(config.card.min_selection_chars, 1);
        assert_eq!(config.drag.margin, 10.0);
        assert_eq!(config.translator.from_lang, "en");
        assert_eq!(config.translator.to_lang, "zh");
        assert!(config.pronunciation.enabled);
        assert_eq!(config.locale, Locale::Zh);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"card":{"debounce_ms":0},"locale":"en"}"#).unwrap();

        assert_eq!(config.card.debounce_ms, 0);
        assert_eq!(config.card.anchor_offset_y, 20.0);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.messages().translation_failed, "Translation failed");
    }
}
