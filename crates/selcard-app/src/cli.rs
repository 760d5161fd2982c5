use clap::Parser;
use selcard_config::Config;
use selcard_config::messages::Locale;

/// Selection translation card backend
#[derive(Parser, Debug, Default)]
#[command(version, about)]
pub struct Cli {
    /// WebSocket URL of the page script host
    #[arg(long)]
    pub ws_url: Option<String>,

    /// JSON file holding the persisted toggle
    #[arg(long)]
    pub settings: Option<String>,

    /// Delay before re-reading the selection after mouse-up
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Shortest selection that opens a card
    #[arg(long)]
    pub min_chars: Option<usize>,

    /// Message language: zh or en
    #[arg(long, value_parser = parse_locale)]
    pub locale: Option<Locale>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.ws_url {
            config.bridge.ws_url = url.clone();
        }
        if let Some(path) = &self.settings {
            config.settings.path = path.clone();
        }
        if let Some(ms) = self.debounce_ms {
            config.card.debounce_ms = ms;
        }
        if let Some(chars) = self.min_chars {
            config.card.min_selection_chars = chars;
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
    }
}

fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::parse(raw).ok_or_else(|| format!("unsupported locale: {raw}"))
}
