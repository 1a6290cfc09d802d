use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

use crate::models::tool::ToolResult;

pub const MISSING_OPERANDS: &str = "Both 'a' and 'b' must be provided.";
pub const NOT_INTEGERS: &str = "'a' and 'b' must be integers";

/// Operands of the multiply tool, as both the model and the tool service send them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiplyArgs {
    pub a: String,
    pub b: String,
}

impl MultiplyArgs {
    pub fn new<A: Into<String>, B: Into<String>>(a: A, b: B) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Parse the raw argument text of a tool call.
    ///
    /// Models sometimes emit operands as JSON integers, so those are taken as well as
    /// strings, under lower or upper case keys. A missing or null operand is left empty and
    /// rejected later by [`multiply`].
    pub fn from_arguments(raw: &str) -> Result<Self, String> {
        Self::parse(raw, true)
    }

    /// Parse a request sent to the tool service, where operands must be JSON strings
    pub fn from_request_body(raw: &str) -> Result<Self, String> {
        Self::parse(raw, false)
    }

    fn parse(raw: &str, accept_integers: bool) -> Result<Self, String> {
        let invalid = |detail: String| format!("Invalid arguments for multiply: {}", detail);

        let value: Value = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| invalid("expected a JSON object".to_string()))?;

        let operand = |key: &str| -> Result<String, String> {
            match object.get(key).or_else(|| object.get(&key.to_uppercase())) {
                None | Some(Value::Null) => Ok(String::new()),
                Some(Value::String(text)) => Ok(text.clone()),
                Some(Value::Number(number))
                    if accept_integers && (number.is_i64() || number.is_u64()) =>
                {
                    Ok(number.to_string())
                }
                Some(other) => Err(invalid(format!("'{}' must be a string, got {}", key, other))),
            }
        };

        Ok(Self {
            a: operand("a")?,
            b: operand("b")?,
        })
    }
}

/// Multiply two base 10 integers of any magnitude exactly
pub fn multiply(a: &str, b: &str) -> ToolResult {
    if a.trim().is_empty() || b.trim().is_empty() {
        return ToolResult::failure(MISSING_OPERANDS);
    }

    match (parse_integer(a), parse_integer(b)) {
        (Some(a), Some(b)) => ToolResult::success((a * b).to_string()),
        _ => ToolResult::failure(NOT_INTEGERS),
    }
}

/// The result reported when the tool itself breaks
pub fn internal_error<E: Display>(error: E) -> ToolResult {
    ToolResult::failure(format!("Internal error: {}", error))
}

/// Accepts surrounding whitespace, one optional sign and ASCII digits
fn parse_integer(text: &str) -> Option<BigInt> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    Some(if negative { -magnitude } else { magnitude })
}
