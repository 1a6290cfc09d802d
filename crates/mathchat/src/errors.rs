use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures that end a chat request before a reply is produced
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error("Upstream call failed: {0}")]
    Upstream(String),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// The HTTP status this failure is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            ChatError::Validation(_) => 400,
            ChatError::Upstream(_) | ChatError::MalformedResponse(_) => 502,
            ChatError::Internal(_) => 500,
        }
    }

    /// The message that is safe to hand back to the caller.
    ///
    /// Upstream and internal details stay in the operator log.
    pub fn public_message(&self) -> String {
        match self {
            ChatError::Validation(message) | ChatError::MalformedResponse(message) => {
                message.clone()
            }
            ChatError::Upstream(_) => "Upstream service call failed.".to_string(),
            ChatError::Internal(_) => "An unexpected error occurred.".to_string(),
        }
    }
}

pub type ChatResult<T> = Result<T, ChatError>;
