use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use selcard_core::{CardServices, MenuController, SelectionCardController};
use selcard_settings::{ListenerId, SettingsStore};
use selcard_types::{AppEvent, PageEvent, UiCommand};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod menu;
pub mod mouse_up;
pub mod pointer;

use menu::{handle_menu_click, handle_menu_init, handle_settings_changed};
use mouse_up::handle_mouse_up;
use pointer::{handle_pointer_down, handle_pointer_move, handle_pointer_release};

/// Everything a handler needs, owned by the loop
pub struct EventContext {
    pub card: SelectionCardController,
    pub menu: MenuController,
    pub commands_tx: AsyncSender<UiCommand>,
    settings: Arc<dyn SettingsStore>,
    listeners: Vec<ListenerId>,
}

impl EventContext {
    /// Subscribes to the settings store before returning, so a change made
    /// before the loop first runs is still delivered on `settings_tx`.
    pub fn new(
        state: &AppState,
        services: CardServices,
        event_tx: AsyncSender<AppEvent>,
        settings_tx: AsyncSender<bool>,
        commands_tx: AsyncSender<UiCommand>,
    ) -> Self {
        let card = SelectionCardController::new(
            &state.config,
            state.selection.clone(),
            services,
            event_tx,
        );
        let card_listener = card.observe_settings(state.settings.as_ref());

        // Relabel the menu when the flag changes from any context.
        // `settings_tx` is unbounded so a listener never blocks inside `set`.
        let menu_listener = state.settings.on_change(Arc::new(move |enabled| {
            if let Err(e) = settings_tx.try_send(enabled) {
                tracing::error!("Failed to forward settings change: {}", e);
            }
        }));

        Self {
            card,
            menu: MenuController::new(state.settings.clone(), state.config.messages()),
            commands_tx,
            settings: state.settings.clone(),
            listeners: vec![card_listener, menu_listener],
        }
    }

    pub async fn send(&self, command: UiCommand) -> anyhow::Result<()> {
        self.commands_tx.send(command).await?;
        Ok(())
    }

    /// Push the current card state to the page
    pub async fn render(&self) -> anyhow::Result<()> {
        let command = match self.card.view() {
            Some(view) => UiCommand::Render(view),
            None => UiCommand::Hide,
        };
        self.send(command).await
    }
}

impl Drop for EventContext {
    fn drop(&mut self) {
        for id in self.listeners.drain(..) {
            self.settings.off_change(id);
        }
    }
}

/// App's main loop
pub async fn event_loop(
    mut ctx: EventContext,
    event_rx: AsyncReceiver<AppEvent>,
    settings_rx: AsyncReceiver<bool>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    let result: anyhow::Result<()> = loop {
        tokio::select! {
            event = event_rx.recv() => {
                let event = match event {
                    Ok(event) => event,
                    Err(e) => break Err(e.into()),
                };
                tracing::debug!("[EVENT_LOOP] Event: {:?}", std::mem::discriminant(&event));
                if let Err(e) = handle_events(&mut ctx, event).await {
                    break Err(e);
                }
            }
            enabled = settings_rx.recv() => {
                let enabled = match enabled {
                    Ok(enabled) => enabled,
                    Err(e) => break Err(e.into()),
                };
                if let Err(e) = handle_settings_changed(&mut ctx, enabled).await {
                    break Err(e);
                }
            }
            _ = cancel.cancelled() => break Ok(()),
        }
    };

    drop(ctx);
    tracing::info!("[EVENT_LOOP] Stopped");
    result
}

async fn handle_events(ctx: &mut EventContext, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::Page(event) => handle_page_event(ctx, event).await?,
        AppEvent::Card(update) => {
            if ctx.card.apply_update(update) {
                ctx.render().await?;
            }
        }
    }

    Ok(())
}

async fn handle_page_event(ctx: &mut EventContext, event: PageEvent) -> anyhow::Result<()> {
    match event {
        PageEvent::Selection(_) => {
            // Routed to the tracked selection by the bridge
        }
        PageEvent::MouseUp(ev) => handle_mouse_up(ctx, ev).await?,
        PageEvent::PointerDown(ev) => handle_pointer_down(ctx, ev).await?,
        PageEvent::PointerMove(ev) => handle_pointer_move(ctx, ev).await?,
        PageEvent::PointerUp(_) | PageEvent::PointerLeave => handle_pointer_release(ctx).await?,
        PageEvent::CloseClicked => {
            if ctx.card.close() {
                ctx.send(UiCommand::Hide).await?;
            }
        }
        PageEvent::PronounceClicked => {
            ctx.card.pronounce();
        }
        PageEvent::MenuClicked { item_id } => handle_menu_click(ctx, &item_id).await?,
        PageEvent::MenuInit => handle_menu_init(ctx).await?,
    }

    Ok(())
}
