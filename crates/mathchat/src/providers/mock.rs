use async_trait::async_trait;
use std::sync::Mutex;

use crate::errors::{ChatError, ChatResult};
use crate::models::message::Message;
use crate::models::tool::Tool;
use crate::providers::base::{LlmTurn, Provider};

/// A mock provider that returns pre-configured turns and records what it was sent
pub struct MockProvider {
    responses: Mutex<Vec<ChatResult<LlmTurn>>>,
    calls: Mutex<Vec<(Vec<Message>, Vec<Tool>)>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<ChatResult<LlmTurn>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Messages and tools of every call so far
    pub fn calls(&self) -> Vec<(Vec<Message>, Vec<Tool>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> ChatResult<LlmTurn> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), tools.to_vec()));

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(ChatError::Internal("MockProvider ran out of responses".to_string()))
        } else {
            responses.remove(0)
        }
    }
}
