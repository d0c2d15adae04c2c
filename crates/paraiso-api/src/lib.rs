//! Paraíso API crate - axum HTTP server and route handlers.
//!
//! Serves the hotel landing page and its assets, the `/chat` conversation
//! endpoint, and read-only listings over the FAQ dataset.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
