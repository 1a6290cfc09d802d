use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const MULTIPLY_TOOL_NAME: &str = "multiply";

/// A tool that can be offered to a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// JSON schema for the arguments the tool accepts
    pub parameters: Value,
}

impl Tool {
    /// Create a new tool with the given name and description
    pub fn new<N, D>(name: N, description: D, parameters: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// The exact big-integer multiplication tool
pub fn multiply_tool() -> Tool {
    Tool::new(
        MULTIPLY_TOOL_NAME,
        "Multiply two integers of any size exactly. Pass both operands as base 10 strings.",
        json!({
            "type": "object",
            "properties": {
                "a": {
                    "type": "string",
                    "description": "The first integer, e.g. \"-123456789012345678901234567890\""
                },
                "b": {
                    "type": "string",
                    "description": "The second integer"
                }
            },
            "required": ["a", "b"]
        }),
    )
}

/// A tool invocation requested by the model.
///
/// `arguments` is the raw JSON text the model produced. It is replayed verbatim on the
/// follow-up call and only parsed when the tool is actually run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolRequest {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl ToolRequest {
    pub fn new<I, N, A>(id: I, name: N, arguments: A) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        A: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Outcome of a tool execution, exactly one of `result` and `error` is set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolResult {
    pub result: Option<String>,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success<S: Into<String>>(result: S) -> Self {
        Self {
            result: Some(result.into()),
            error: None,
        }
    }

    pub fn failure<S: Into<String>>(error: S) -> Self {
        Self {
            result: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// The JSON text handed back to the model as the tool message content
    pub fn to_content(&self) -> String {
        json!({
            "result": self.result,
            "error": self.error,
        })
        .to_string()
    }
}
