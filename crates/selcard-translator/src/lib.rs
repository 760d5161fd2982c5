mod player;
mod pronounce;
mod transmart;
mod youdao;

pub use player::{AudioPlayer, PlaybackError};
pub use pronounce::{AudioLocator, PronounceError, Pronouncer, pronounceable_word};
pub use transmart::TransmartTranslator;
pub use youdao::YoudaoPronouncer;

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text with the provider's configured language pair.
    /// One attempt, no retry.
    async fn translate(&self, text: &str) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsuccessful response: ret_code={0}")]
    Unsuccessful(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
