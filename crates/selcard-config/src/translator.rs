use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://transmart.qq.com/api/imt".to_string()
}

fn default_client_key() -> String {
    "tencent_transmart_crx_TW96aWxsYS81LjAgKE1hY2ludG9zaDsgSW50ZWwgTWFjIE9TIFggMTBfMTVfNykgQXBwbGVXZWJLaX".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36".to_string()
}

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "zh".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_client_key")]
    pub client_key: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            client_key: default_client_key(),
            user_agent: default_user_agent(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
        }
    }
}
