use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use selcard_core::CardServices;
use selcard_types::{AppEvent, UiCommand};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{EventContext, event_loop};
use crate::io::bridge_io;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub events: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub commands: (AsyncSender<UiCommand>, AsyncReceiver<UiCommand>),
    /// Settings flag changes, fed by a store listener
    pub settings: (AsyncSender<bool>, AsyncReceiver<bool>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            events: kanal::bounded_async(256), // pointer-move bursts
            commands: kanal::bounded_async(64),
            settings: kanal::unbounded_async(),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn commands(&self) -> AsyncSender<UiCommand> {
        self.channels.commands.0.clone()
    }

    pub fn spawn_tasks(&self, services: CardServices) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Subscribed here, not inside the task, so no settings change is missed
        let ctx = EventContext::new(
            &self.state,
            services,
            self.channels.events.0.clone(),
            self.channels.settings.0.clone(),
            self.channels.commands.0.clone(),
        );

        // Event loop
        tasks.spawn(event_loop(
            ctx,
            self.channels.events.1.clone(),
            self.channels.settings.1.clone(),
            self.cancel_token.child_token(),
        ));

        // Page bridge
        tasks.spawn(bridge_io(
            self.state.clone(),
            self.channels.events.0.clone(),
            self.channels.commands.1.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
