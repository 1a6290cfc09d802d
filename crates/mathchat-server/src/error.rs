use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mathchat::errors::ChatError;
use serde_json::json;
use thiserror::Error;

pub const ENV_PREFIX: &str = "MATHCHAT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Invalid server address: {0}")]
    InvalidAddress(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Map a settings field to the environment variable that sets it.
///
/// Accepts either a dotted path (`provider.api_key`) or a bare field name as reported by
/// serde's "missing field" errors.
pub fn to_env_var(field: &str) -> String {
    let path = if field.contains('.') {
        field.to_string()
    } else {
        let section = match field {
            "api_key" | "model" | "temperature" | "max_tokens" => Some("provider"),
            "url" => Some("tool"),
            "template" => Some("prompt"),
            "port" | "request_timeout_secs" => Some("server"),
            _ => None,
        };
        match section {
            Some(section) => format!("{}.{}", section, field),
            None => field.to_string(),
        }
    };

    format!("{}_{}", ENV_PREFIX, path.replace('.', "__").to_uppercase())
}

/// A chat failure on its way out to the client as `{ "error": ... }`.
///
/// Logging happens where the failure is raised, not here.
#[derive(Debug)]
pub struct ApiError(pub ChatError);

impl From<ChatError> for ApiError {
    fn from(error: ChatError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(json!({ "error": self.0.public_message() }))).into_response()
    }
}
