use mathchat::agent::Agent;
use mathchat::errors::ChatResult;
use mathchat::prompt_template::SystemPrompt;
use mathchat::providers::base::Provider;
use mathchat::providers::openai::OpenAiProvider;
use mathchat::systems::{LocalMultiply, RemoteMultiply, ToolClient};
use std::sync::Arc;

use crate::configuration::{Settings, ToolSettings};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
}

impl AppState {
    pub fn new(agent: Agent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }

    /// Wire the agent up from settings
    pub fn from_settings(settings: Settings) -> ChatResult<Self> {
        let provider: Arc<dyn Provider> =
            Arc::new(OpenAiProvider::new(settings.provider.into_config())?);

        let tools: Arc<dyn ToolClient> = match settings.tool {
            ToolSettings::Local => Arc::new(LocalMultiply),
            ToolSettings::Remote { url } => {
                tracing::info!(%url, "using remote multiply tool");
                Arc::new(RemoteMultiply::new(url)?)
            }
        };

        let prompt = settings
            .prompt
            .template
            .map(SystemPrompt::new)
            .unwrap_or_default();

        Ok(Self::new(Agent::new(provider, tools, prompt)))
    }
}
