use super::EventContext;

pub async fn handle_menu_init(ctx: &mut EventContext) -> anyhow::Result<()> {
    for command in ctx.menu.init() {
        ctx.send(command).await?;
    }
    Ok(())
}

/// The store notification relabels the item, see `handle_settings_changed`
pub async fn handle_menu_click(ctx: &mut EventContext, item_id: &str) -> anyhow::Result<()> {
    if let Err(e) = ctx.menu.on_click(item_id) {
        tracing::error!("Failed to persist translation toggle: {}", e);
    }
    Ok(())
}

/// Flag changed from a menu click here or in another context
pub async fn handle_settings_changed(ctx: &mut EventContext, enabled: bool) -> anyhow::Result<()> {
    tracing::info!("Translation enabled: {}", enabled);
    ctx.card.set_enabled(enabled);
    ctx.send(ctx.menu.on_settings_changed(enabled)).await
}
