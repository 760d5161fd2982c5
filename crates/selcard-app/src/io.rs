use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use selcard_core::TrackedSelection;
use selcard_types::{AppEvent, PageEvent, UiCommand};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Connects to the page and relays events in and commands out
pub async fn bridge_io(
    state: Arc<AppState>,
    event_tx: AsyncSender<AppEvent>,
    commands_rx: AsyncReceiver<UiCommand>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let ws_url = state.config.bridge.ws_url.clone();
    tracing::info!("Starting page bridge on {}", ws_url);

    let selection = state.selection.clone();
    let bridge = selcard_io::start_page_bridge(&ws_url, move |event| {
        let selection = selection.clone();
        let event_tx = event_tx.clone();
        async move { route_page_event(&selection, &event_tx, event).await }
    })
    .await?;

    let page_commands = bridge.commands.clone();
    let relay = async move {
        while let Ok(command) = commands_rx.recv().await {
            if page_commands.send(command).await.is_err() {
                break;
            }
        }
    };

    tokio::select! {
        _ = relay => {
            tracing::warn!("Command relay stopped");
        }
        _ = bridge.reader => {
            tracing::warn!("Page disconnected");
        }
        _ = cancel.cancelled() => {
            tracing::info!("Page bridge stopping");
        }
    }

    bridge.writer.abort();
    Ok(())
}

/// Selection reports bypass the loop so a debounced mouse-up sees them.
/// Everything else keeps page order and waits for room in the queue.
pub(crate) async fn route_page_event(
    selection: &TrackedSelection,
    event_tx: &AsyncSender<AppEvent>,
    event: PageEvent,
) {
    match event {
        PageEvent::Selection(snapshot) => selection.update(snapshot),
        event => {
            if let Err(e) = event_tx.send(AppEvent::Page(event)).await {
                tracing::error!("Failed to send page event to app: {}", e);
            }
        }
    }
}
