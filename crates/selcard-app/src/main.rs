use std::sync::Arc;

use clap::Parser;
use selcard_config::Config;
use selcard_core::CardServices;
use selcard_io::BridgePlayer;
use selcard_settings::FileSettings;
use selcard_translator::{TransmartTranslator, Translator, YoudaoPronouncer};
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod controller;
pub mod events;
pub mod io;
pub mod state;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = Config::new();
    cli.apply(&mut config);

    let settings = Arc::new(FileSettings::open(&config.settings.path));
    let state = Arc::new(AppState::new(config, settings));
    let controller = AppController::new(state.clone());

    let translator = TransmartTranslator::new(state.config.translator.clone());
    let provider = translator.metadata();
    tracing::info!(
        "Translation provider: {} (api key required: {})",
        provider.name,
        provider.requires_api_key
    );

    let services = CardServices {
        translator: Arc::new(translator),
        pronouncer: Arc::new(YoudaoPronouncer::new(
            state.config.pronunciation.clone(),
        )),
        player: Arc::new(BridgePlayer::new(controller.commands())),
    };

    let mut tasks = controller.spawn_tasks(services);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::debug!("task ended during shutdown: {e}");
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
