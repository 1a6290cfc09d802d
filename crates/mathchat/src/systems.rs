//! The tool collaborator: exact multiplication, either run in-process or over HTTP.
//!
//! Implementations never fail past their own boundary. Every problem, including bad
//! arguments from the model, comes back as a [`ToolResult`] carrying an error so the model
//! can react to it.
use async_trait::async_trait;

use crate::models::tool::{ToolRequest, ToolResult, MULTIPLY_TOOL_NAME};

mod local;
pub mod multiply;
mod remote;

pub use local::LocalMultiply;
pub use multiply::MultiplyArgs;
pub use remote::RemoteMultiply;

#[async_trait]
pub trait ToolClient: Send + Sync {
    /// Multiply two base 10 integers given as strings
    async fn multiply(&self, a: &str, b: &str) -> ToolResult;

    /// Run a tool invocation requested by the model
    async fn invoke(&self, request: &ToolRequest) -> ToolResult {
        if request.name != MULTIPLY_TOOL_NAME {
            return ToolResult::failure(format!("Unknown tool: {}", request.name));
        }

        match MultiplyArgs::from_arguments(&request.arguments) {
            Ok(args) => self.multiply(&args.a, &args.b).await,
            Err(error) => ToolResult::failure(error),
        }
    }
}
