//! Paraíso application binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Load the FAQ dataset
//! 3. Build the chat engine over an in-memory session store
//! 4. Start the idle-session purge loop (when a timeout is configured)
//! 5. Start the axum HTTP server

mod cli;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;

use paraiso_api::routes;
use paraiso_api::state::AppState;
use paraiso_chat::{ChatEngine, FaqDataset, InMemorySessionStore, MenuCatalog};
use paraiso_core::config::ParaisoConfig;

use crate::cli::CliArgs;

/// Periodically drop sessions that have been idle past the configured timeout.
async fn session_purge_loop(engine: Arc<ChatEngine>, interval_secs: u64) {
    tracing::info!(interval_secs, "Session purge loop started");

    let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(interval_secs));
    loop {
        interval.tick().await;
        match engine.purge_expired() {
            Ok(0) => {}
            Ok(removed) => tracing::debug!(removed, "Expired sessions purged"),
            Err(e) => tracing::warn!(error = %e, "Session purge failed"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config. Loaded before tracing so the configured log level applies.
    let config_file = args.resolve_config_path();
    let loaded = ParaisoConfig::load(&config_file);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => ParaisoConfig::default(),
    };
    args.apply(&mut config);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Paraíso v{}", env!("CARGO_PKG_VERSION"));
    match loaded {
        Ok(_) => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Err(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Configuration not loaded, using defaults"
        ),
    }

    // Dataset.
    let dataset = FaqDataset::load_or_empty(Path::new(&config.dataset.path));
    tracing::info!(records = dataset.len(), "FAQ dataset ready");

    // Chat engine.
    let timeout_minutes = config.chat.session_idle_timeout_minutes;
    let store = InMemorySessionStore::with_idle_timeout(timeout_minutes);
    let engine = ChatEngine::new(Arc::new(dataset), MenuCatalog::hotel(), Arc::new(store));

    let state = AppState::new(config.clone(), engine);

    if timeout_minutes > 0 {
        let engine = Arc::clone(&state.engine);
        tokio::spawn(async move {
            session_purge_loop(engine, 60).await;
        });
    }

    tracing::info!(
        root = %config.static_files.root,
        index = %config.static_files.index,
        "Serving static site"
    );

    if let Err(e) = routes::start_server(&config, state).await {
        tracing::error!(error = %e, "Server stopped");
        return Err(e.into());
    }

    Ok(())
}
