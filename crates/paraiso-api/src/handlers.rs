//! Route handler functions for the chat and dataset endpoints.
//!
//! Static files are served by tower-http services wired in `routes`.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use paraiso_chat::{ChatReply, IntentCount};

use crate::error::ApiError;
use crate::state::AppState;

/// Session id used when the request does not carry one.
pub const DEFAULT_SESSION: &str = "default";

// =============================================================================
// Request / response types
// =============================================================================

/// Body of `POST /chat`, after lenient decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub session: String,
}

impl ChatRequest {
    /// Decode a request body without ever failing.
    ///
    /// A body that is not a JSON object, or fields that are absent or not
    /// strings, fall back to an empty message and the default session.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let session = value
            .get("session")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_SESSION)
            .to_string();
        Self { message, session }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MenuResponse {
    pub menu: Vec<IntentCount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IntentItem {
    pub id: i64,
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IntentMenuResponse {
    pub intent: String,
    pub items: Vec<IntentItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FaqResponse {
    pub id: i64,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub faq_count: usize,
    pub active_sessions: usize,
}

// =============================================================================
// Handler functions
// =============================================================================

/// POST /chat - advance the caller's conversation by one message.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatReply>, ApiError> {
    let request = ChatRequest::from_body(&body);
    let reply = state
        .engine
        .handle_message(&request.message, &request.session)?;
    Ok(Json(reply))
}

/// GET /menu - distinct intents in the dataset with their record counts.
pub async fn list_intents(State(state): State<AppState>) -> Json<MenuResponse> {
    Json(MenuResponse {
        menu: state.engine.dataset().intent_counts(),
    })
}

/// GET /menu/{intent} - questions tagged with one intent.
pub async fn menu_by_intent(
    State(state): State<AppState>,
    Path(intent): Path<String>,
) -> Json<IntentMenuResponse> {
    let items = state
        .engine
        .dataset()
        .by_intent(&intent)
        .into_iter()
        .map(|r| IntentItem {
            id: r.id,
            question: r.question,
        })
        .collect();
    Json(IntentMenuResponse { intent, items })
}

/// Parse a `/faq/{id}` path segment. Only plain ASCII digits are an id.
fn parse_faq_id(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// GET /faq/{id} - a single record by numeric id.
///
/// Unknown and non-numeric ids are both 404.
pub async fn faq_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FaqResponse>, ApiError> {
    let id = parse_faq_id(&id).ok_or(ApiError::NotFound)?;
    let record = state
        .engine
        .dataset()
        .find_by_id(id)
        .ok_or(ApiError::NotFound)?;

    Ok(Json(FaqResponse {
        id: record.id,
        question: record.question.clone(),
        answer: record.response.clone(),
    }))
}

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        faq_count: state.engine.dataset().len(),
        active_sessions: state.engine.active_sessions()?,
    }))
}
