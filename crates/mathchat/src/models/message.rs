use serde::{Deserialize, Serialize};

use super::role::Role;
use super::tool::ToolRequest;

/// A single conversational turn.
///
/// Each role only carries the fields that make sense for it, so a user turn can never hold
/// tool calls and a tool turn always names the call it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        /// Absent when the turn is only a tool invocation placeholder
        content: Option<String>,
        #[serde(rename = "toolCalls", default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolRequest>,
    },
    Tool {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        content: String,
    },
}

impl Message {
    pub fn system<S: Into<String>>(content: S) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    pub fn user<S: Into<String>>(content: S) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    /// A plain assistant answer with no tool calls
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Message::Assistant {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// An assistant turn that asks for tools to be run
    pub fn assistant_tool_calls(content: Option<String>, tool_calls: Vec<ToolRequest>) -> Self {
        Message::Assistant {
            content,
            tool_calls,
        }
    }

    pub fn tool<I: Into<String>, S: Into<String>>(tool_call_id: I, content: S) -> Self {
        Message::Tool {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Message::System { .. } => Role::System,
            Message::User { .. } => Role::User,
            Message::Assistant { .. } => Role::Assistant,
            Message::Tool { .. } => Role::Tool,
        }
    }

    /// Get the text content, if there is any
    pub fn text(&self) -> Option<&str> {
        match self {
            Message::System { content }
            | Message::User { content }
            | Message::Tool { content, .. } => Some(content),
            Message::Assistant { content, .. } => content.as_deref(),
        }
    }

    pub fn tool_calls(&self) -> &[ToolRequest] {
        match self {
            Message::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls().is_empty()
    }

    /// Whether the turn may be shown to the end user: no system directives, no tool results
    /// and no assistant tool invocation placeholders.
    pub fn is_user_visible(&self) -> bool {
        match self {
            Message::User { .. } => true,
            Message::Assistant { tool_calls, .. } => tool_calls.is_empty(),
            Message::System { .. } | Message::Tool { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_wire_format() {
        let value = serde_json::to_value(Message::user("What is 2+2?")).unwrap();
        assert_eq!(value, json!({"role": "user", "content": "What is 2+2?"}));

        let value = serde_json::to_value(Message::assistant("4")).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "4"}));
    }

    #[test]
    fn test_tool_call_placeholder_wire_format() {
        let message = Message::assistant_tool_calls(
            None,
            vec![ToolRequest::new("call_1", "multiply", r#"{"a":"2","b":"3"}"#)],
        );
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "assistant");
        assert!(value["content"].is_null());
        assert_eq!(value["toolCalls"][0]["id"], "call_1");
        assert!(message.has_tool_calls());
        assert!(!message.is_user_visible());
    }

    #[test]
    fn test_tool_message_wire_format() {
        let value = serde_json::to_value(Message::tool("call_1", "{}")).unwrap();
        assert_eq!(
            value,
            json!({"role": "tool", "toolCallId": "call_1", "content": "{}"})
        );
    }

    #[test]
    fn test_visibility() {
        assert!(Message::user("hi").is_user_visible());
        assert!(Message::assistant("hello").is_user_visible());
        assert!(!Message::system("secret").is_user_visible());
        assert!(!Message::tool("1", "{}").is_user_visible());
        assert_eq!(Message::tool("1", "{}").role(), Role::Tool);
        assert_eq!(Message::assistant_tool_calls(None, vec![]).text(), None);
    }
}
