//! Router setup with all routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression, the static
//! site services, and the chat/dataset handlers.

use std::path::PathBuf;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use paraiso_core::config::{ParaisoConfig, StaticFilesConfig};
use paraiso_core::error::ParaisoError;

use crate::handlers;
use crate::state::AppState;

/// Asset directories served under the static root, each at `/<name>/...`.
const ASSET_DIRS: [&str; 3] = ["CSS", "img", "video"];

/// Build the CORS layer.
///
/// An empty origin list is fully permissive: any origin, method and header.
/// A configured list restricts origins and the chat request headers.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(allowed))
}

/// Landing page plus the asset directories.
fn static_routes(config: &StaticFilesConfig) -> Router<AppState> {
    let root = PathBuf::from(&config.root);
    let mut router = Router::new().route_service("/", ServeFile::new(root.join(&config.index)));
    for dir in ASSET_DIRS {
        router = router.nest_service(&format!("/{}", dir), ServeDir::new(root.join(dir)));
    }
    router
}

/// Create the axum Router with all routes and middleware.
///
/// # Arguments
/// * `state` - The shared application state.
///
/// # Returns
/// A fully configured axum Router ready to serve requests.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat))
        .route("/menu", get(handlers::list_intents))
        .route("/menu/{intent}", get(handlers::menu_by_intent))
        .route("/faq/{id}", get(handlers::faq_by_id))
        .route("/health", get(handlers::health));

    api_routes
        .merge(static_routes(&state.config.static_files))
        .layer(DefaultBodyLimit::max(state.config.server.body_limit_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
pub async fn start_server(config: &ParaisoConfig, state: AppState) -> Result<(), ParaisoError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ParaisoError::Api(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!(addr = %addr, "API server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ParaisoError::Api(format!("Server error: {}", e)))?;

    Ok(())
}

