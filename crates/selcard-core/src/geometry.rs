use selcard_config::drag::DragConfig;
use selcard_types::{Point, Position, Viewport};

/// Keep the assumed card box `margin` pixels inside the viewport.
/// When the viewport is too small for the card, the top-left margin wins.
pub fn clamp_card(candidate: Position, viewport: Viewport, footprint: &DragConfig) -> Position {
    Position {
        left: clamp_axis(
            candidate.left,
            viewport.width,
            footprint.card_width,
            footprint.margin,
        ),
        top: clamp_axis(
            candidate.top,
            viewport.height,
            footprint.card_height,
            footprint.margin,
        ),
    }
}

fn clamp_axis(value: f64, extent: f64, size: f64, margin: f64) -> f64 {
    let upper = extent - size - margin;
    value.min(upper).max(margin)
}

/// Initial card placement: pointer plus offset, clamped
pub fn anchor_position(
    pointer: Point,
    offset: Point,
    viewport: Viewport,
    footprint: &DragConfig,
) -> Position {
    clamp_card(
        Position {
            left: pointer.x + offset.x,
            top: pointer.y + offset.y,
        },
        viewport,
        footprint,
    )
}
