use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use kanal::AsyncSender;
use selcard_config::{Config, Messages};
use selcard_config::card::CardConfig;
use selcard_settings::{ListenerId, SettingsStore};
use selcard_translator::{AudioLocator, AudioPlayer, Pronouncer, Translator};
use selcard_types::{AppEvent, CardUpdate, CardView, Point, PointerEvent, Position, SessionId};

use crate::drag::{DragController, Propagation};
use crate::geometry::anchor_position;
use crate::selection::{SelectionSource, selected_text};

/// External services the card talks to
#[derive(Clone)]
pub struct CardServices {
    pub translator: Arc<dyn Translator>,
    pub pronouncer: Arc<dyn Pronouncer>,
    pub player: Arc<dyn AudioPlayer>,
}

/// One selection-to-translation lifecycle
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSession {
    pub id: SessionId,
    pub original_text: String,
    /// Placeholder while loading, then the result or the failure message
    pub translation: String,
    pub is_loading: bool,
    pub anchor: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseUpOutcome {
    /// Feature disabled or nothing usable selected
    Hidden,
    /// Released inside the card
    Ignored,
    Opened(SessionId),
}

/// Pronunciation state for the last distinct `original_text`
#[derive(Default)]
struct PronounceState {
    text: String,
    locator: Option<AudioLocator>,
    probe_session: Option<SessionId>,
    available: bool,
}

/// Shows, fills and hides the translation card
pub struct SelectionCardController {
    config: CardConfig,
    messages: Messages,
    pronunciation_enabled: bool,
    enabled: Arc<AtomicBool>,
    selection: Arc<dyn SelectionSource>,
    services: CardServices,
    events_tx: AsyncSender<AppEvent>,
    last_session: SessionId,
    session: Option<SelectionSession>,
    pronounce: PronounceState,
    drag: DragController,
}

impl SelectionCardController {
    pub fn new(
        config: &Config,
        selection: Arc<dyn SelectionSource>,
        services: CardServices,
        events_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            config: config.card.clone(),
            messages: config.messages(),
            pronunciation_enabled: config.pronunciation.enabled,
            enabled: Arc::new(AtomicBool::new(selcard_settings::DEFAULT_ENABLED)),
            selection,
            services,
            events_tx,
            last_session: SessionId::default(),
            session: None,
            pronounce: PronounceState::default(),
            drag: DragController::new(config.drag),
        }
    }

    /// Read the flag now and follow later changes
    pub fn observe_settings(&self, store: &dyn SettingsStore) -> ListenerId {
        self.enabled.store(store.get(), Ordering::SeqCst);
        let enabled = self.enabled.clone();
        store.on_change(Arc::new(move |value| {
            tracing::debug!("Card saw settings change: {}", value);
            enabled.store(value, Ordering::SeqCst);
        }))
    }

    /// Takes effect on the next mouse-up; an open card stays until then
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn is_visible(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&SelectionSession> {
        self.session.as_ref()
    }

    pub fn pronounce_available(&self) -> bool {
        self.is_visible() && self.pronounce.available
    }

    pub async fn handle_mouse_up(&mut self, ev: PointerEvent) -> MouseUpOutcome {
        if !self.is_enabled() {
            self.hide();
            return MouseUpOutcome::Hidden;
        }

        if ev.target.is_inside_card() {
            return MouseUpOutcome::Ignored;
        }

        // Let a click on already-selected text clear the selection first
        if self.config.debounce_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.debounce_ms)).await;
        }

        let snapshot = self.selection.current();
        match selected_text(&snapshot, self.config.min_selection_chars) {
            Some(text) => MouseUpOutcome::Opened(self.open_session(text, &ev)),
            None => {
                self.hide();
                MouseUpOutcome::Hidden
            }
        }
    }

    fn open_session(&mut self, text: String, ev: &PointerEvent) -> SessionId {
        let id = self.last_session.next();
        self.last_session = id;

        let offset = Point {
            x: self.config.anchor_offset_x,
            y: self.config.anchor_offset_y,
        };
        let anchor = anchor_position(ev.point(), offset, ev.viewport, self.drag.footprint());

        tracing::info!("Session {:?} opened: {} chars", id, text.chars().count());
        self.session = Some(SelectionSession {
            id,
            original_text: text.clone(),
            translation: self.messages.loading_placeholder.to_string(),
            is_loading: true,
            anchor,
        });
        self.drag.set_position(anchor);
        self.drag.attach();

        self.refresh_pronunciation(id, &text);
        self.spawn_translation(id, text);

        id
    }

    fn spawn_translation(&self, session: SessionId, text: String) {
        let translator = self.services.translator.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let update = match translator.translate(&text).await {
                Ok(translation) if !translation.text.trim().is_empty() => {
                    tracing::debug!(
                        "{:?} translated {} -> {} by {}",
                        session,
                        translation.from,
                        translation.to,
                        translation.provider
                    );
                    CardUpdate::Translated {
                        session,
                        text: translation.text,
                    }
                }
                Ok(_) => {
                    tracing::warn!("Translation for {:?} came back empty", session);
                    CardUpdate::TranslationFailed { session }
                }
                Err(e) => {
                    tracing::warn!("Translation failed for {:?}: {}", session, e);
                    CardUpdate::TranslationFailed { session }
                }
            };

            if let Err(e) = tx.send(AppEvent::Card(update)).await {
                tracing::debug!("Dropping translation result: {}", e);
            }
        });
    }

    /// Probe audio only when the text differs from the last probed one
    fn refresh_pronunciation(&mut self, session: SessionId, text: &str) {
        if self.pronounce.text == text {
            return;
        }

        self.pronounce = PronounceState {
            text: text.to_string(),
            ..PronounceState::default()
        };

        if !self.pronunciation_enabled {
            return;
        }

        let Some(locator) = self.services.pronouncer.resource_for(text) else {
            return;
        };

        self.pronounce.locator = Some(locator.clone());
        self.pronounce.probe_session = Some(session);

        let pronouncer = self.services.pronouncer.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let available = pronouncer.probe(&locator).await;
            let update = CardUpdate::PronunciationProbed { session, available };
            if let Err(e) = tx.send(AppEvent::Card(update)).await {
                tracing::debug!("Dropping probe result: {}", e);
            }
        });
    }

    /// Apply a spawned result; stale sessions are ignored.
    /// Returns whether the card changed.
    pub fn apply_update(&mut self, update: CardUpdate) -> bool {
        match update {
            CardUpdate::Translated { session, text } => self.finish_loading(session, text),
            CardUpdate::TranslationFailed { session } => {
                let message = self.messages.translation_failed.to_string();
                self.finish_loading(session, message)
            }
            CardUpdate::PronunciationProbed { session, available } => {
                if self.pronounce.probe_session != Some(session) {
                    tracing::debug!("Ignoring stale probe from {:?}", session);
                    return false;
                }
                self.pronounce.probe_session = None;
                self.pronounce.available = available;
                self.is_visible()
            }
        }
    }

    fn finish_loading(&mut self, session: SessionId, translation: String) -> bool {
        match self.session.as_mut() {
            Some(current) if current.id == session && current.is_loading => {
                current.translation = translation;
                current.is_loading = false;
                tracing::debug!("Session {:?} finished loading", session);
                true
            }
            _ => {
                tracing::debug!("Ignoring stale translation from {:?}", session);
                false
            }
        }
    }

    /// Close button; no-op if already hidden
    pub fn close(&mut self) -> bool {
        if self.session.is_none() {
            return false;
        }
        self.hide();
        true
    }

    fn hide(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!("Session {:?} closed", session.id);
        }
        self.drag.detach();
    }

    /// Speaker control; playback errors are swallowed
    pub fn pronounce(&self) -> bool {
        if !self.pronounce_available() {
            return false;
        }
        let Some(locator) = self.pronounce.locator.clone() else {
            return false;
        };

        let player = self.services.player.clone();
        tokio::spawn(async move {
            if let Err(e) = player.play(&locator).await {
                tracing::debug!("Playback failed for {}: {}", locator, e);
            }
        });
        true
    }

    pub fn pointer_down(&mut self, ev: &PointerEvent) -> Propagation {
        self.drag.pointer_down(ev)
    }

    pub fn pointer_move(&mut self, ev: &PointerEvent) -> Propagation {
        self.drag.pointer_move(ev)
    }

    /// Pointer released or left the document
    pub fn pointer_release(&mut self) -> Propagation {
        self.drag.end_drag()
    }

    pub fn view(&self) -> Option<CardView> {
        let session = self.session.as_ref()?;
        Some(CardView {
            position: self.drag.position(),
            title: self.messages.title(session.is_loading),
            original_text: session.original_text.clone(),
            translation: session.translation.clone(),
            loading: session.is_loading,
            dragging: self.drag.is_dragging(),
            pronounce_available: self.pronounce.available,
            close_tooltip: self.messages.close_tooltip.to_string(),
            pronounce_tooltip: self.messages.pronounce_tooltip.to_string(),
        })
    }
}
