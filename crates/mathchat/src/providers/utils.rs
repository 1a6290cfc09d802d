use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};
use std::collections::HashSet;

use super::base::LlmTurn;
use crate::errors::{ChatError, ChatResult};
use crate::models::message::Message;
use crate::models::tool::{Tool, ToolRequest};

pub const NO_DIRECT_CONTENT: &str = "[No direct content in assistant response]";

lazy_static! {
    static ref INVALID_NAME_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9_-]").unwrap();
}

/// Convert internal Message format to OpenAI's API message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| match message {
            Message::System { content } => json!({
                "role": "system",
                "content": content,
            }),
            Message::User { content } => json!({
                "role": "user",
                "content": content,
            }),
            Message::Assistant {
                content,
                tool_calls,
            } => {
                let mut converted = json!({
                    "role": "assistant",
                    "content": content,
                });
                if !tool_calls.is_empty() {
                    let calls: Vec<Value> = tool_calls
                        .iter()
                        .map(|call| {
                            json!({
                                "id": call.id,
                                "type": "function",
                                "function": {
                                    "name": call.name,
                                    "arguments": call.arguments,
                                }
                            })
                        })
                        .collect();
                    converted["tool_calls"] = json!(calls);
                }
                converted
            }
            Message::Tool {
                tool_call_id,
                content,
            } => json!({
                "role": "tool",
                "tool_call_id": tool_call_id,
                "content": content,
            }),
        })
        .collect()
}

/// Convert internal Tool format to OpenAI's API tool specification
pub fn tools_to_openai_spec(tools: &[Tool]) -> ChatResult<Vec<Value>> {
    let mut tool_names = HashSet::new();
    let mut result = Vec::new();

    for tool in tools {
        let name = sanitize_function_name(&tool.name);
        if !tool_names.insert(name.clone()) {
            return Err(ChatError::Internal(format!(
                "Duplicate tool name: {}",
                tool.name
            )));
        }

        result.push(json!({
            "type": "function",
            "function": {
                "name": name,
                "description": tool.description,
                "parameters": tool.parameters,
            }
        }));
    }

    Ok(result)
}

/// Convert OpenAI's API response into either a final answer or a tool request
pub fn openai_response_to_turn(response: &Value) -> ChatResult<LlmTurn> {
    let choices = response
        .get("choices")
        .and_then(|choices| choices.as_array())
        .filter(|choices| !choices.is_empty())
        .ok_or_else(|| {
            ChatError::MalformedResponse(
                "LLM response missing 'choices' or is empty".to_string(),
            )
        })?;

    let message = choices[0]
        .get("message")
        .filter(|message| message.is_object())
        .ok_or_else(|| {
            ChatError::MalformedResponse("LLM response choice has no 'message'".to_string())
        })?;

    let content = message
        .get("content")
        .and_then(|content| content.as_str())
        .map(String::from);

    let tool_calls = message
        .get("tool_calls")
        .and_then(|calls| calls.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    if tool_calls.is_empty() {
        let text = content
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_DIRECT_CONTENT.to_string());
        return Ok(LlmTurn::DirectAnswer(text));
    }

    let requests = tool_calls
        .iter()
        .map(parse_tool_call)
        .collect::<ChatResult<Vec<_>>>()?;

    Ok(LlmTurn::tool_request(content, requests))
}

fn parse_tool_call(tool_call: &Value) -> ChatResult<ToolRequest> {
    let id = tool_call
        .get("id")
        .and_then(|id| id.as_str())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ChatError::MalformedResponse("Tool call is missing an 'id'".to_string()))?;

    let function = tool_call.get("function");
    let name = function
        .and_then(|function| function.get("name"))
        .and_then(|name| name.as_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ChatError::MalformedResponse(format!("Tool call {} is missing a function name", id))
        })?;

    let arguments = function
        .and_then(|function| function.get("arguments"))
        .map(|arguments| match arguments {
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "{}".to_string());

    Ok(ToolRequest::new(id, name, arguments))
}

pub fn sanitize_function_name(name: &str) -> String {
    INVALID_NAME_CHARS.replace_all(name, "_").to_string()
}
