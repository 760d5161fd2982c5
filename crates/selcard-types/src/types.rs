use serde::{Deserialize, Serialize};

/// Internal events consumed by the app's main loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    Page(PageEvent),
    Card(CardUpdate),
}

/// Events reported by the page script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Latest document selection, sent whenever it changes
    Selection(SelectionSnapshot),
    MouseUp(PointerEvent),
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    PointerLeave,
    CloseClicked,
    PronounceClicked,
    MenuClicked { item_id: String },
    /// Extension installed or browser started
    MenuInit,
}

/// Commands sent back to the page script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiCommand {
    Render(CardView),
    Hide,
    PlayAudio { url: String },
    RemoveMenus,
    SetMenu { id: String, label: String },
}

/// Results of work spawned by the card controller
#[derive(Debug, Clone, PartialEq)]
pub enum CardUpdate {
    Translated { session: SessionId, text: String },
    TranslationFailed { session: SessionId },
    PronunciationProbed { session: SessionId, available: bool },
}

/// Monotonic identifier of a selection session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        SessionId(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Top-left corner of the card in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// What the pointer was over when the event fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    #[default]
    Page,
    Card,
    CardTitleBar,
}

impl PointerTarget {
    pub fn is_inside_card(self) -> bool {
        matches!(self, PointerTarget::Card | PointerTarget::CardTitleBar)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub target: PointerTarget,
    #[serde(default)]
    pub viewport: Viewport,
}

impl PointerEvent {
    pub fn point(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub text: String,
    pub range_count: u32,
    pub collapsed: bool,
}

/// Everything the page needs to draw the card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub position: Position,
    pub title: String,
    pub original_text: String,
    pub translation: String,
    pub loading: bool,
    pub dragging: bool,
    pub pronounce_available: bool,
    pub close_tooltip: String,
    pub pronounce_tooltip: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_event_decodes_from_tagged_json() {
        let raw = r#"{"type":"mouse_up","x":12.0,"y":40.5,"target":"card_title_bar","viewport":{"width":800.0,"height":600.0}}"#;
        let event: PageEvent = serde_json::from_str(raw).unwrap();

        match event {
            PageEvent::MouseUp(ev) => {
                assert_eq!(ev.target, PointerTarget::CardTitleBar);
                assert_eq!(ev.viewport.width, 800.0);
                assert_eq!(ev.point(), Point { x: 12.0, y: 40.5 });
            }
            other => panic!("Wrong event: {:?}", other),
        }
    }

    #[test]
    fn pointer_event_defaults_missing_fields() {
        let raw = r#"{"type":"pointer_move","x":1.0,"y":2.0}"#;
        let event: PageEvent = serde_json::from_str(raw).unwrap();

        assert_eq!(
            event,
            PageEvent::PointerMove(PointerEvent {
                x: 1.0,
                y: 2.0,
                target: PointerTarget::Page,
                viewport: Viewport::default(),
            })
        );
    }

    #[test]
    fn menu_click_carries_item_id() {
        let raw = r#"{"type":"menu_clicked","item_id":"toggle-translation"}"#;
        let event: PageEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(
            event,
            PageEvent::MenuClicked {
                item_id: "toggle-translation".to_string()
            }
        );
    }

    #[test]
    fn hide_command_encodes_as_tag_only() {
        let json = serde_json::to_string(&UiCommand::Hide).unwrap();
        assert_eq!(json, r#"{"type":"hide"}"#);
    }

    #[test]
    fn title_bar_counts_as_inside_card() {
        assert!(PointerTarget::CardTitleBar.is_inside_card());
        assert!(PointerTarget::Card.is_inside_card());
        assert!(!PointerTarget::Page.is_inside_card());
    }
}
