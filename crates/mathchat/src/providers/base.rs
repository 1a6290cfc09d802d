use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ChatResult;
use crate::models::message::Message;
use crate::models::tool::{Tool, ToolRequest};

/// What the model came back with on a single completion call
#[derive(Debug, Clone, PartialEq)]
pub enum LlmTurn {
    /// A final textual answer
    DirectAnswer(String),
    /// The model wants tools to be run before it answers.
    ///
    /// `placeholder` is the assistant turn to keep in the history so the follow-up call can
    /// replay the original tool calls.
    ToolRequest {
        placeholder: Message,
        requests: Vec<ToolRequest>,
    },
}

impl LlmTurn {
    pub fn tool_request(content: Option<String>, requests: Vec<ToolRequest>) -> Self {
        LlmTurn::ToolRequest {
            placeholder: Message::assistant_tool_calls(content, requests.clone()),
            requests,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Base trait for LLM completion backends
#[async_trait]
pub trait Provider: Send + Sync {
    /// Run one completion over the full message list, offering `tools` when non-empty.
    /// Each call is a single attempt.
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> ChatResult<LlmTurn>;
}
