use selcard_core::Propagation;
use selcard_types::PointerEvent;

use super::EventContext;

pub async fn handle_pointer_down(ctx: &mut EventContext, ev: PointerEvent) -> anyhow::Result<()> {
    if ctx.card.pointer_down(&ev) == Propagation::Stop {
        ctx.render().await?;
    }
    Ok(())
}

pub async fn handle_pointer_move(ctx: &mut EventContext, ev: PointerEvent) -> anyhow::Result<()> {
    if ctx.card.pointer_move(&ev) == Propagation::Stop {
        ctx.render().await?;
    }
    Ok(())
}

pub async fn handle_pointer_release(ctx: &mut EventContext) -> anyhow::Result<()> {
    if ctx.card.pointer_release() == Propagation::Stop {
        ctx.render().await?;
    }
    Ok(())
}
