use selcard_config::drag::DragConfig;
use selcard_types::{Point, PointerEvent, PointerTarget, Position};

use crate::geometry::clamp_card;

/// Whether the page beneath should also see the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Title-bar dragging of the card, bounded by the viewport
pub struct DragController {
    footprint: DragConfig,
    position: Position,
    dragging: bool,
    pointer_offset: Point,
    attached: bool,
}

impl DragController {
    pub fn new(footprint: DragConfig) -> Self {
        Self {
            footprint,
            position: Position::default(),
            dragging: false,
            pointer_offset: Point::default(),
            attached: false,
        }
    }

    /// Start listening for pointer input; called when the card shows
    pub fn attach(&mut self) {
        if !self.attached {
            tracing::debug!("Drag listeners attached");
        }
        self.attached = true;
    }

    /// Stop listening; idempotent
    pub fn detach(&mut self) {
        if self.attached {
            tracing::debug!("Drag listeners detached");
        }
        self.attached = false;
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn footprint(&self) -> &DragConfig {
        &self.footprint
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn pointer_down(&mut self, ev: &PointerEvent) -> Propagation {
        if !self.attached || ev.target != PointerTarget::CardTitleBar {
            return Propagation::Continue;
        }

        self.pointer_offset = Point {
            x: ev.x - self.position.left,
            y: ev.y - self.position.top,
        };
        self.dragging = true;
        tracing::debug!("Drag start, offset {:?}", self.pointer_offset);

        Propagation::Stop
    }

    pub fn pointer_move(&mut self, ev: &PointerEvent) -> Propagation {
        if !self.attached || !self.dragging {
            return Propagation::Continue;
        }

        let candidate = Position {
            left: ev.x - self.pointer_offset.x,
            top: ev.y - self.pointer_offset.y,
        };
        self.position = clamp_card(candidate, ev.viewport, &self.footprint);

        Propagation::Stop
    }

    /// Pointer released or left the document
    pub fn end_drag(&mut self) -> Propagation {
        if !self.attached {
            return Propagation::Continue;
        }
        let was_dragging = self.dragging;
        self.dragging = false;
        if was_dragging {
            tracing::debug!("Drag end at {:?}", self.position);
            Propagation::Stop
        } else {
            Propagation::Continue
        }
    }
}
