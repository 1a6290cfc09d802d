use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::multiply::{internal_error, MultiplyArgs};
use super::ToolClient;
use crate::errors::{ChatError, ChatResult};
use crate::models::tool::ToolResult;

/// Calls a multiplication service over HTTP, POSTing `{a, b}` and reading back a
/// [`ToolResult`]
pub struct RemoteMultiply {
    client: Client,
    url: String,
}

impl RemoteMultiply {
    pub fn new<S: Into<String>>(url: S) -> ChatResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ChatError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn call(&self, a: &str, b: &str) -> Result<ToolResult, String> {
        let response = self
            .client
            .post(&self.url)
            .json(&MultiplyArgs::new(a, b))
            .send()
            .await
            .map_err(|e| format!("tool service unreachable: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("tool service returned {}", status));
        }

        let result: ToolResult = response
            .json()
            .await
            .map_err(|e| format!("tool service response was not understood: {}", e))?;

        match (&result.result, &result.error) {
            (Some(_), None) | (None, Some(_)) => Ok(result),
            _ => Err("tool service must set exactly one of 'result' and 'error'".to_string()),
        }
    }
}

#[async_trait]
impl ToolClient for RemoteMultiply {
    async fn multiply(&self, a: &str, b: &str) -> ToolResult {
        match self.call(a, b).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(url = %self.url, %error, "multiply tool call failed");
                internal_error(error)
            }
        }
    }
}
