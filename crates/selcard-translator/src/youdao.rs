use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use selcard_config::pronunciation::PronunciationConfig;

use crate::pronounce::{AudioLocator, PronounceError, Pronouncer, pronounceable_word};

/// Youdao dictionary voice clips
#[derive(Clone)]
pub struct YoudaoPronouncer {
    client: reqwest::Client,
    config: PronunciationConfig,
}

impl YoudaoPronouncer {
    pub fn new(config: PronunciationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Download the clip and require a non-empty audio body
    async fn check(&self, locator: &AudioLocator) -> Result<usize, PronounceError> {
        let response = self.client.get(locator.as_str()).send().await?;

        if !response.status().is_success() {
            return Err(PronounceError::Status(response.status()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !is_audio_type(&content_type) {
            return Err(PronounceError::NotAudio(content_type));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(PronounceError::Empty);
        }
        Ok(body.len())
    }
}

#[async_trait]
impl Pronouncer for YoudaoPronouncer {
    fn resource_for(&self, word: &str) -> Option<AudioLocator> {
        let word = pronounceable_word(word)?;
        let voice = self.config.voice_type.to_string();
        let url = Url::parse_with_params(
            &self.config.audio_url,
            &[("audio", word.as_str()), ("type", voice.as_str())],
        )
        .ok()?;
        Some(AudioLocator(url.to_string()))
    }

    async fn probe(&self, locator: &AudioLocator) -> bool {
        match self.check(locator).await {
            Ok(bytes) => {
                tracing::debug!("Audio available ({} bytes): {}", bytes, locator);
                true
            }
            Err(e) => {
                tracing::debug!("Audio unavailable for {}: {}", locator, e);
                false
            }
        }
    }
}

fn is_audio_type(content_type: &str) -> bool {
    content_type.starts_with("audio/") || content_type.starts_with("application/octet-stream")
}
