use std::fmt;

use async_trait::async_trait;

/// URL of a playable pronunciation clip
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioLocator(pub String);

impl AudioLocator {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pronunciation audio lookup
#[async_trait]
pub trait Pronouncer: Send + Sync {
    /// Locator for a single letters-only word; pure, no I/O
    fn resource_for(&self, word: &str) -> Option<AudioLocator>;

    /// Whether the clip actually loads. Failures read as unavailable.
    async fn probe(&self, locator: &AudioLocator) -> bool;
}

/// Trimmed, lowercased word if it matches `^[a-z]+$` case-insensitively
pub fn pronounceable_word(text: &str) -> Option<String> {
    let word = text.trim().to_lowercase();
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase()) {
        Some(word)
    } else {
        None
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PronounceError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Not audio: {0}")]
    NotAudio(String),

    #[error("Empty audio clip")]
    Empty,
}
