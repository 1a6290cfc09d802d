use async_trait::async_trait;

use super::multiply::multiply;
use super::ToolClient;
use crate::models::tool::ToolResult;

/// Runs the multiplication in-process
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMultiply;

#[async_trait]
impl ToolClient for LocalMultiply {
    async fn multiply(&self, a: &str, b: &str) -> ToolResult {
        multiply(a, b)
    }
}
