use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    /// Accepts tags like `zh`, `zh_CN.UTF-8`, `en-US`
    pub fn parse(raw: &str) -> Option<Locale> {
        let mut normalized = raw.trim().replace('_', "-").to_ascii_lowercase();
        if let Some(idx) = normalized.find('.') {
            normalized.truncate(idx);
        }

        match normalized.split('-').next() {
            Some("zh") => Some(Locale::Zh),
            Some("en") => Some(Locale::En),
            _ => None,
        }
    }
}

/// User-visible strings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Messages {
    pub card_title: &'static str,
    pub loading_marker: &'static str,
    pub loading_placeholder: &'static str,
    pub translation_failed: &'static str,
    pub close_tooltip: &'static str,
    pub pronounce_tooltip: &'static str,
    pub menu_enabled: &'static str,
    pub menu_disabled: &'static str,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Zh => Self {
                card_title: "翻译",
                loading_marker: "(ing...)",
                loading_placeholder: "ing...",
                translation_failed: "翻译失败，请稍后重试",
                close_tooltip: "关闭",
                pronounce_tooltip: "发音",
                menu_enabled: "划词翻译：已开启（点击关闭）",
                menu_disabled: "划词翻译：已关闭（点击开启）",
            },
            Locale::En => Self {
                card_title: "Translation",
                loading_marker: "(loading...)",
                loading_placeholder: "loading...",
                translation_failed: "Translation failed",
                close_tooltip: "Close",
                pronounce_tooltip: "Pronounce",
                menu_enabled: "Selection translation: on (click to turn off)",
                menu_disabled: "Selection translation: off (click to turn on)",
            },
        }
    }

    pub fn menu_label(&self, enabled: bool) -> &'static str {
        if enabled {
            self.menu_enabled
        } else {
            self.menu_disabled
        }
    }

    pub fn title(&self, loading: bool) -> String {
        if loading {
            format!("{} {}", self.card_title, self.loading_marker)
        } else {
            self.card_title.to_string()
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_locale_tags() {
        assert_eq!(Locale::parse("zh_CN.UTF-8"), Some(Locale::Zh));
        assert_eq!(Locale::parse("en-US"), Some(Locale::En));
        assert_eq!(Locale::parse(" EN "), Some(Locale::En));
        assert_eq!(Locale::parse("fr"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn title_shows_loading_marker() {
        let messages = Messages::for_locale(Locale::Zh);
        assert_eq!(messages.title(true), "翻译 (ing...)");
        assert_eq!(messages.title(false), "翻译");
    }

    #[test]
    fn menu_label_follows_flag() {
        let messages = Messages::for_locale(Locale::En);
        assert_ne!(messages.menu_label(true), messages.menu_label(false));
        assert_eq!(messages.menu_label(true), messages.menu_enabled);
    }
}
