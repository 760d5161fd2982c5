use async_trait::async_trait;

use crate::pronounce::AudioLocator;

/// Plays a pronunciation clip on whatever surface owns the speakers
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, locator: &AudioLocator) -> Result<(), PlaybackError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("Playback target unavailable: {0}")]
    Unavailable(String),

    #[error("Playback rejected: {0}")]
    Rejected(String),
}
