use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::errors::{ChatError, ChatResult};
use crate::models::conversation::{ChatRequest, Conversation};
use crate::models::message::Message;
use crate::models::tool::{multiply_tool, ToolRequest, ToolResult};
use crate::prompt_template::SystemPrompt;
use crate::providers::base::{LlmTurn, Provider};
use crate::providers::utils::NO_DIRECT_CONTENT;
use crate::systems::ToolClient;

const SKIPPED_TOOL_CALL: &str = "Skipped: only the first tool call of a turn is executed.";

/// Where a reply currently is, used to label log events and failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    FirstCall,
    ToolInvoking,
    SecondCall,
    Finalizing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::FirstCall => "first_call",
            Stage::ToolInvoking => "tool_invoking",
            Stage::SecondCall => "second_call",
            Stage::Finalizing => "finalizing",
        };
        f.write_str(name)
    }
}

/// The final answer plus the history that is safe to show the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub history: Vec<Message>,
}

/// Agent drives one chat turn through the LLM, with at most one round of tool use.
///
/// It keeps no state between requests; each call to [`Agent::reply`] owns its own
/// conversation and dropping the future abandons any call in flight.
pub struct Agent {
    provider: Arc<dyn Provider>,
    tools: Arc<dyn ToolClient>,
    prompt: SystemPrompt,
}

impl Agent {
    pub fn new(
        provider: Arc<dyn Provider>,
        tools: Arc<dyn ToolClient>,
        prompt: SystemPrompt,
    ) -> Self {
        Self {
            provider,
            tools,
            prompt,
        }
    }

    /// Validate the client history, ask the model, run the multiply tool if it asks for it,
    /// and return the answer with the filtered history.
    pub async fn reply(&self, request: ChatRequest) -> ChatResult<ChatReply> {
        let mut conversation =
            Conversation::validate(request).map_err(|e| failed(Stage::Validating, e))?;

        let directive = self
            .prompt
            .render()
            .map_err(|e| failed(Stage::Validating, e))?;
        conversation.prepend_system(directive);

        tracing::debug!(stage = %Stage::FirstCall, messages = conversation.len());
        let first = self
            .provider
            .complete(conversation.messages(), &[multiply_tool()])
            .await
            .map_err(|e| failed(Stage::FirstCall, e))?;

        let answer = match first {
            LlmTurn::DirectAnswer(text) => text,
            LlmTurn::ToolRequest {
                placeholder,
                requests,
            } => {
                conversation.push(placeholder);
                self.run_tool_round(&mut conversation, &requests).await?;
                self.second_call(&conversation).await?
            }
        };

        tracing::debug!(stage = %Stage::Finalizing);
        conversation.push(Message::assistant(answer.clone()));

        Ok(ChatReply {
            message: answer,
            history: conversation.filtered_history(),
        })
    }

    /// Execute the first requested invocation and record its result.
    async fn run_tool_round(
        &self,
        conversation: &mut Conversation,
        requests: &[ToolRequest],
    ) -> ChatResult<()> {
        let (request, skipped) = requests.split_first().ok_or_else(|| {
            failed(
                Stage::ToolInvoking,
                ChatError::MalformedResponse("Tool request carried no tool calls".to_string()),
            )
        })?;

        tracing::info!(
            stage = %Stage::ToolInvoking,
            tool = %request.name,
            call_id = %request.id,
            "running tool"
        );
        let result = self.tools.invoke(request).await;
        if let Some(error) = &result.error {
            tracing::warn!(call_id = %request.id, %error, "tool reported an error");
        }
        conversation.push(Message::tool(request.id.clone(), result.to_content()));

        // Every replayed call id needs an answer before the follow-up call
        for extra in skipped {
            tracing::warn!(call_id = %extra.id, tool = %extra.name, "ignoring additional tool call");
            conversation.push(Message::tool(
                extra.id.clone(),
                ToolResult::failure(SKIPPED_TOOL_CALL).to_content(),
            ));
        }

        Ok(())
    }

    async fn second_call(&self, conversation: &Conversation) -> ChatResult<String> {
        tracing::debug!(stage = %Stage::SecondCall, messages = conversation.len());
        let turn = self
            .provider
            .complete(conversation.messages(), &[])
            .await
            .map_err(|e| failed(Stage::SecondCall, e))?;

        match turn {
            LlmTurn::DirectAnswer(text) => Ok(text),
            LlmTurn::ToolRequest { requests, .. } => {
                tracing::warn!(
                    requested = requests.len(),
                    "model asked for a second tool round, answering with a placeholder"
                );
                Ok(NO_DIRECT_CONTENT.to_string())
            }
        }
    }
}

fn failed(stage: Stage, error: ChatError) -> ChatError {
    match &error {
        ChatError::Validation(_) => tracing::info!(%stage, %error, "chat request rejected"),
        _ => tracing::error!(%stage, %error, "chat request failed"),
    }
    error
}
