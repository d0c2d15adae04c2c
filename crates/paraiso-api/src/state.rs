//! Application state shared across all route handlers.
//!
//! Passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use paraiso_chat::ChatEngine;
use paraiso_core::config::ParaisoConfig;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The config is
/// read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<ParaisoConfig>,
    /// Conversation engine holding the dataset and session store.
    pub engine: Arc<ChatEngine>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ParaisoConfig, engine: ChatEngine) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            start_time: Instant::now(),
        }
    }
}
