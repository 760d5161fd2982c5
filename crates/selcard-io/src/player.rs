use async_trait::async_trait;
use kanal::AsyncSender;
use selcard_translator::{AudioLocator, AudioPlayer, PlaybackError};
use selcard_types::UiCommand;

/// Asks the page to play the clip
pub struct BridgePlayer {
    commands: AsyncSender<UiCommand>,
}

impl BridgePlayer {
    pub fn new(commands: AsyncSender<UiCommand>) -> Self {
        Self { commands }
    }
}

#[async_trait]
impl AudioPlayer for BridgePlayer {
    async fn play(&self, locator: &AudioLocator) -> Result<(), PlaybackError> {
        self.commands
            .send(UiCommand::PlayAudio {
                url: locator.to_string(),
            })
            .await
            .map_err(|e| PlaybackError::Unavailable(e.to_string()))
    }
}
