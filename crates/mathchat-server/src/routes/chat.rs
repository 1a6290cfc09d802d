use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use mathchat::agent::ChatReply;
use mathchat::errors::ChatError;
use mathchat::models::conversation::ChatRequest;

use crate::error::ApiError;
use crate::state::AppState;

pub const CONTENT_TYPE_REQUIRED: &str = "Content-Type must be application/json";

fn is_json(headers: &HeaderMap) -> bool {
    headers.get_all(CONTENT_TYPE).iter().any(|value| {
        value
            .to_str()
            .map(|value| value.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    })
}

async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ChatReply>, ApiError> {
    if !is_json(&headers) {
        tracing::info!("rejected chat request without a JSON content type");
        return Err(ChatError::Validation(CONTENT_TYPE_REQUIRED.to_string()).into());
    }

    let request: ChatRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::info!(error = %e, "rejected undecodable chat request");
        ChatError::Validation(format!("Invalid request body: {}", e))
    })?;

    let reply = state.agent.reply(request).await?;
    Ok(Json(reply))
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(handler))
        .with_state(state)
}
