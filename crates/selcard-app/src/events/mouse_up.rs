use selcard_core::MouseUpOutcome;
use selcard_types::PointerEvent;

use super::EventContext;

pub async fn handle_mouse_up(ctx: &mut EventContext, ev: PointerEvent) -> anyhow::Result<()> {
    let was_visible = ctx.card.is_visible();

    match ctx.card.handle_mouse_up(ev).await {
        MouseUpOutcome::Opened(session) => {
            tracing::debug!("Mouse-up opened {:?}", session);
            ctx.render().await?;
        }
        MouseUpOutcome::Hidden => {
            if was_visible {
                ctx.render().await?;
            }
        }
        MouseUpOutcome::Ignored => {}
    }

    Ok(())
}
