use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::LlmClient;
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::gemini_client::{GEMINI_BASE_URL, GeminiClient};
use super::groq_client::{GROQ_BASE_URL, GroqClient};

pub struct LlmClientFactory;

#[derive(Debug, thiserror::Error)]
pub enum LlmClientFactoryError {
    #[error("missing API key: the {provider} provider requires {env_var}")]
    MissingApiKey {
        provider: LlmProvider,
        env_var: &'static str,
    },
    #[error("client initialization failed: {0}")]
    InitializationFailed(String),
}

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, LlmClientFactoryError> {
        let provider = settings.provider;
        let api_key = settings.api_key.trim();
        if api_key.is_empty() {
            return Err(LlmClientFactoryError::MissingApiKey {
                provider,
                env_var: provider.api_key_env_var(),
            });
        }

        let timeout = Duration::from_secs(settings.request_timeout_secs);
        let init_failed = |e: crate::application::ports::LlmClientError| {
            LlmClientFactoryError::InitializationFailed(e.to_string())
        };

        match provider {
            LlmProvider::Groq => {
                let base_url = settings.base_url.as_deref().unwrap_or(GROQ_BASE_URL);
                tracing::info!(base_url, model = %settings.model, "Using Groq chat completions");
                let client = GroqClient::new(base_url, api_key, settings.temperature, timeout)
                    .map_err(init_failed)?;
                Ok(Arc::new(client))
            }
            LlmProvider::Gemini => {
                let base_url = settings.base_url.as_deref().unwrap_or(GEMINI_BASE_URL);
                tracing::info!(base_url, model = %settings.model, "Using Gemini generateContent");
                let client = GeminiClient::new(base_url, api_key, settings.temperature, timeout)
                    .map_err(init_failed)?;
                Ok(Arc::new(client))
            }
        }
    }
}
