//! End-to-end flow through the event loop over kanal channels

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};
use selcard_config::{Config, Messages};
use selcard_core::{CardServices, TOGGLE_MENU_ID};
use selcard_settings::{MemorySettings, SettingsStore};
use selcard_translator::{
    AudioLocator, AudioPlayer, PlaybackError, ProviderMetadata, Pronouncer, TranslateError,
    Translation, Translator,
};
use selcard_types::{
    AppEvent, PageEvent, PointerEvent, PointerTarget, SelectionSnapshot, UiCommand, Viewport,
};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::{EventContext, event_loop};
use crate::state::AppState;

struct DictTranslator;

#[async_trait]
impl Translator for DictTranslator {
    async fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
        match text {
            "cat" => Ok(Translation {
                text: "猫".to_string(),
                from: "en".to_string(),
                to: "zh".to_string(),
                provider: "dict".to_string(),
            }),
            _ => Err(TranslateError::ApiError("unknown word".to_string())),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "dict".to_string(),
            requires_api_key: false,
        }
    }
}

struct SilentPronouncer;

#[async_trait]
impl Pronouncer for SilentPronouncer {
    fn resource_for(&self, _word: &str) -> Option<AudioLocator> {
        None
    }

    async fn probe(&self, _locator: &AudioLocator) -> bool {
        false
    }
}

struct NullPlayer;

#[async_trait]
impl AudioPlayer for NullPlayer {
    async fn play(&self, _locator: &AudioLocator) -> Result<(), PlaybackError> {
        Ok(())
    }
}

struct Running {
    state: Arc<AppState>,
    settings: Arc<MemorySettings>,
    event_tx: AsyncSender<AppEvent>,
    commands_rx: AsyncReceiver<UiCommand>,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

fn start(enabled: bool) -> Running {
    let mut config = Config::default();
    config.card.debounce_ms = 0;
    let settings = Arc::new(MemorySettings::with_value(enabled));
    let state = Arc::new(AppState::new(config, settings.clone()));

    let (event_tx, event_rx) = kanal::bounded_async(64);
    let (settings_tx, settings_rx) = kanal::unbounded_async();
    let (commands_tx, commands_rx) = kanal::bounded_async(64);
    let cancel = CancellationToken::new();
    let services = CardServices {
        translator: Arc::new(DictTranslator),
        pronouncer: Arc::new(SilentPronouncer),
        player: Arc::new(NullPlayer),
    };

    let ctx = EventContext::new(
        &state,
        services,
        event_tx.clone(),
        settings_tx,
        commands_tx,
    );
    let handle = tokio::spawn(event_loop(ctx, event_rx, settings_rx, cancel.clone()));

    Running {
        state,
        settings,
        event_tx,
        commands_rx,
        cancel,
        handle,
    }
}

impl Running {
    async fn page(&self, event: PageEvent) {
        self.event_tx.send(AppEvent::Page(event)).await.expect("send failed");
    }

    fn select(&self, text: &str) {
        self.state.selection.update(SelectionSnapshot {
            text: text.to_string(),
            range_count: 1,
            collapsed: false,
        });
    }

    async fn next_command(&self) -> UiCommand {
        match timeout(Duration::from_secs(2), self.commands_rx.recv()).await {
            Ok(Ok(command)) => command,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout - no command arrived"),
        }
    }

    async fn stop(self) {
        self.cancel.cancel();
        let result = timeout(Duration::from_secs(2), self.handle)
            .await
            .expect("event loop did not stop")
            .expect("event loop panicked");
        assert!(result.is_ok());
    }
}

fn mouse_up(x: f64, y: f64) -> PageEvent {
    PageEvent::MouseUp(PointerEvent {
        x,
        y,
        target: PointerTarget::Page,
        viewport: Viewport {
            width: 1000.0,
            height: 600.0,
        },
    })
}

#[tokio::test]
async fn selection_renders_loading_then_translation() {
    let app = start(true);
    app.select("cat");

    app.page(mouse_up(100.0, 100.0)).await;

    let UiCommand::Render(loading) = app.next_command().await else {
        panic!("Expected render");
    };
    assert!(loading.loading);
    assert_eq!(loading.original_text, "cat");

    let UiCommand::Render(done) = app.next_command().await else {
        panic!("Expected render");
    };
    assert!(!done.loading);
    assert_eq!(done.translation, "猫");

    app.stop().await;
}

#[tokio::test]
async fn failed_translation_renders_failure_message() {
    let app = start(true);
    app.select("zebra");

    app.page(mouse_up(100.0, 100.0)).await;
    app.next_command().await;

    let UiCommand::Render(done) = app.next_command().await else {
        panic!("Expected render");
    };
    assert_eq!(done.translation, Messages::default().translation_failed);

    app.stop().await;
}

#[tokio::test]
async fn close_click_hides_card() {
    let app = start(true);
    app.select("cat");
    app.page(mouse_up(100.0, 100.0)).await;
    app.next_command().await;
    app.next_command().await;

    app.page(PageEvent::CloseClicked).await;
    assert_eq!(app.next_command().await, UiCommand::Hide);

    // Already hidden: nothing sent
    app.page(PageEvent::CloseClicked).await;
    app.page(PageEvent::MenuInit).await;
    assert_eq!(app.next_command().await, UiCommand::RemoveMenus);

    app.stop().await;
}

#[tokio::test]
async fn menu_toggle_disables_cards_and_relabels() {
    let app = start(true);
    let messages = Messages::default();

    app.page(PageEvent::MenuClicked {
        item_id: TOGGLE_MENU_ID.to_string(),
    })
    .await;

    let expected = UiCommand::SetMenu {
        id: TOGGLE_MENU_ID.to_string(),
        label: messages.menu_disabled.to_string(),
    };
    assert_eq!(app.next_command().await, expected);
    assert!(!app.settings.get());

    app.select("cat");
    app.page(mouse_up(100.0, 100.0)).await;
    app.page(PageEvent::MenuInit).await;

    // One relabel per click, no render for the mouse-up; the menu init is next
    assert_eq!(app.next_command().await, UiCommand::RemoveMenus);

    app.stop().await;
}

#[tokio::test]
async fn change_from_other_context_relabels_menu() {
    let app = start(true);

    // Before the spawned loop has run at all
    app.settings.set(false).unwrap();

    assert_eq!(
        app.next_command().await,
        UiCommand::SetMenu {
            id: TOGGLE_MENU_ID.to_string(),
            label: Messages::default().menu_disabled.to_string(),
        }
    );

    app.stop().await;
}

#[tokio::test]
async fn title_bar_drag_moves_rendered_card() {
    let app = start(true);
    app.select("cat");
    app.page(mouse_up(100.0, 100.0)).await;
    app.next_command().await;
    app.next_command().await;

    let viewport = Viewport {
        width: 1000.0,
        height: 600.0,
    };
    app.page(PageEvent::PointerDown(PointerEvent {
        x: 110.0,
        y: 125.0,
        target: PointerTarget::CardTitleBar,
        viewport,
    }))
    .await;
    let UiCommand::Render(pressed) = app.next_command().await else {
        panic!("Expected render");
    };
    assert!(pressed.dragging);

    app.page(PageEvent::PointerMove(PointerEvent {
        x: 310.0,
        y: 225.0,
        target: PointerTarget::Page,
        viewport,
    }))
    .await;
    let UiCommand::Render(moved) = app.next_command().await else {
        panic!("Expected render");
    };
    assert_eq!(moved.position.left, 300.0);
    assert_eq!(moved.position.top, 220.0);

    app.page(PageEvent::PointerLeave).await;
    let UiCommand::Render(released) = app.next_command().await else {
        panic!("Expected render");
    };
    assert!(!released.dragging);

    app.stop().await;
}
