use std::future::Future;

use futures_util::{SinkExt, StreamExt};
use kanal::AsyncSender;
use selcard_types::{PageEvent, UiCommand};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Invalid page message: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Connection to the page script host
pub struct PageBridge {
    /// Commands queued here are written to the page in order
    pub commands: AsyncSender<UiCommand>,
    /// Finishes when the page side closes the socket
    pub reader: JoinHandle<()>,
    pub writer: JoinHandle<()>,
}

pub fn decode_event(text: &str) -> Result<PageEvent, BridgeError> {
    Ok(serde_json::from_str(text)?)
}

pub fn encode_command(command: &UiCommand) -> Result<String, BridgeError> {
    Ok(serde_json::to_string(command)?)
}

/// Each decoded event is awaited in `on_event` before the next frame is read,
/// so a slow consumer applies backpressure to the socket instead of losing events.
pub async fn start_page_bridge<F, Fut>(
    url: &str,
    mut on_event: F,
) -> Result<PageBridge, BridgeError>
where
    F: FnMut(PageEvent) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let (ws_stream, _) = connect_async(url).await?;
    let (mut write, mut read) = ws_stream.split();
    tracing::info!("Page bridge connected to {}", url);

    let reader = tokio::spawn(async move {
        while let Some(msg) = read.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("Page bridge read failed: {}", e);
                    break;
                }
            };
            if msg.is_close() {
                break;
            }
            if let Ok(text) = msg.to_text()
                && msg.is_text()
            {
                match decode_event(text) {
                    Ok(event) => on_event(event).await,
                    Err(e) => tracing::warn!("Dropping page message: {}", e),
                }
            }
        }
        tracing::info!("Page bridge reader stopped");
    });

    let (commands, commands_rx) = kanal::bounded_async::<UiCommand>(64);
    let writer = tokio::spawn(async move {
        while let Ok(command) = commands_rx.recv().await {
            let json = match encode_command(&command) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode {:?}: {}", command, e);
                    continue;
                }
            };
            if let Err(e) = write.send(Message::text(json)).await {
                tracing::warn!("Page bridge write failed: {}", e);
                break;
            }
        }
        tracing::info!("Page bridge writer stopped");
    });

    Ok(PageBridge {
        commands,
        reader,
        writer,
    })
}

#[cfg(test)]
mod tests {
    use selcard_types::{CardView, Position, SelectionSnapshot};

    use super::*;

    #[test]
    fn decodes_selection_report() {
        let event =
            decode_event(r#"{"type":"selection","text":"cat","range_count":1,"collapsed":false}"#)
                .unwrap();
        assert_eq!(
            event,
            PageEvent::Selection(SelectionSnapshot {
                text: "cat".to_string(),
                range_count: 1,
                collapsed: false,
            })
        );
    }

    #[test]
    fn rejects_unknown_message() {
        assert!(matches!(
            decode_event(r#"{"type":"teleport"}"#),
            Err(BridgeError::Decode(_))
        ));
    }

    #[test]
    fn encodes_render_command() {
        let command = UiCommand::Render(CardView {
            position: Position {
                left: 10.0,
                top: 30.0,
            },
            title: "翻译".to_string(),
            original_text: "cat".to_string(),
            translation: "猫".to_string(),
            loading: false,
            dragging: false,
            pronounce_available: true,
            close_tooltip: "关闭".to_string(),
            pronounce_tooltip: "发音".to_string(),
        });

        let json: serde_json::Value =
            serde_json::from_str(&encode_command(&command).unwrap()).unwrap();
        assert_eq!(json["type"], "render");
        assert_eq!(json["translation"], "猫");
        assert_eq!(json["position"]["top"], 30.0);
    }

    #[tokio::test]
    async fn connect_to_closed_port_fails() {
        let result = start_page_bridge("ws://127.0.0.1:9", |_| async {}).await;
        assert!(matches!(result, Err(BridgeError::WebSocket(_))));
    }
}
