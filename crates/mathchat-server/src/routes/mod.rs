pub mod chat;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::state::AppState;

pub const REQUEST_TIMED_OUT: &str = "Request timed out.";

/// Give the timeout layer's bare 408 the same `{ "error": ... }` body as every other failure
async fn timeout_body(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    tracing::warn!("chat request timed out");
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(json!({ "error": REQUEST_TIMED_OUT })),
    )
        .into_response()
}

/// Build the full router. Requests running past `request_timeout` get a 408 and their
/// in-flight orchestration is dropped.
pub fn configure(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(chat::routes(state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_body))
        .layer(cors)
}
