use serde::Serialize;
use tera::{Context, Error as TeraError, Tera};

use crate::errors::{ChatError, ChatResult};
use crate::models::tool::MULTIPLY_TOOL_NAME;

const DEFAULT_SYSTEM_TEMPLATE: &str = include_str!("prompts/system.md");

pub fn load_prompt<T: Serialize>(template: &str, context_data: &T) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.add_raw_template("inline_template", template)?;
    let context = Context::from_serialize(context_data)?;
    let rendered = tera.render("inline_template", &context)?;
    Ok(rendered)
}

#[derive(Serialize)]
struct DirectiveContext<'a> {
    tool_name: &'a str,
}

/// The system directive put in front of every conversation.
///
/// Only the template is configurable; it is rendered fresh for each request.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemPrompt {
    template: String,
}

impl Default for SystemPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_TEMPLATE)
    }
}

impl SystemPrompt {
    pub fn new<S: Into<String>>(template: S) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self) -> ChatResult<String> {
        let context = DirectiveContext {
            tool_name: MULTIPLY_TOOL_NAME,
        };
        load_prompt(&self.template, &context)
            .map_err(|e| ChatError::Internal(format!("Failed to render system prompt: {}", e)))
    }
}
