use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{GenerationOptions, ReplyFormat};

use super::environment::Environment;
use super::llm_provider::LlmProvider;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub generation: GenerationSettings,
    pub upload: UploadSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    #[serde(default)]
    pub api_key: String,
    /// Default model; empty means the provider's first supported model.
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
    pub temperature: f32,
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub reply_format: Option<ReplyFormat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    pub max_input_chars: usize,
    pub summarize_threshold_chars: usize,
    pub pre_generation_delay_ms: u64,
    pub default_question_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("missing API key: set APP_LLM__API_KEY or {env_var}")]
    MissingApiKey { env_var: &'static str },
    #[error("model {model} is not available for provider {provider}")]
    UnsupportedModel {
        provider: LlmProvider,
        model: String,
    },
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Settings {
    /// Defaults, then `appsettings.{env}.toml` when present, then `APP_*`
    /// environment variables (`APP_LLM__API_KEY`), then the provider's own
    /// key variable when no key was configured.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let env_source = config::Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__");

        let mut settings = Self::load_from(environment, env_source)?;
        settings.resolve_api_key(|name| std::env::var(name).ok());
        settings.validate()?;
        Ok(settings)
    }

    /// Builds settings from defaults, the optional settings file and the given
    /// environment source without any validation.
    pub fn load_from(
        environment: Environment,
        env_source: config::Environment,
    ) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("llm.provider", "groq")?
            .set_default("llm.temperature", 0.2)?
            .set_default("llm.request_timeout_secs", 120)?
            .set_default("generation.max_input_chars", 8000)?
            .set_default("generation.summarize_threshold_chars", 4000)?
            .set_default("generation.pre_generation_delay_ms", 1000)?
            .set_default("generation.default_question_count", 10)?
            .set_default("upload.max_file_size_mb", 10)?
            .set_default("logging.level", "")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(env_source)
            .build()?;

        let mut settings: Settings = configuration.try_deserialize()?;
        if settings.llm.model.trim().is_empty() {
            settings.llm.model = settings.llm.provider.default_model().to_string();
        }
        Ok(settings)
    }

    /// Falls back to the provider-specific variable (`GROQ_API_KEY`,
    /// `GOOGLE_API_KEY`) when `llm.api_key` is blank.
    pub fn resolve_api_key(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.llm.api_key.trim().is_empty() {
            if let Some(key) = lookup(self.llm.provider.api_key_env_var()) {
                self.llm.api_key = key;
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let provider = self.llm.provider;

        if self.llm.api_key.trim().is_empty() {
            return Err(SettingsError::MissingApiKey {
                env_var: provider.api_key_env_var(),
            });
        }

        if !provider.supports_model(&self.llm.model) {
            return Err(SettingsError::UnsupportedModel {
                provider,
                model: self.llm.model.clone(),
            });
        }

        if self.generation.max_input_chars == 0 {
            return Err(SettingsError::Invalid {
                key: "generation.max_input_chars",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.generation.summarize_threshold_chars > self.generation.max_input_chars {
            return Err(SettingsError::Invalid {
                key: "generation.summarize_threshold_chars",
                reason: format!(
                    "must not exceed generation.max_input_chars ({})",
                    self.generation.max_input_chars
                ),
            });
        }

        Ok(())
    }
}

impl LlmSettings {
    pub fn reply_format(&self) -> ReplyFormat {
        self.reply_format
            .unwrap_or_else(|| self.provider.default_reply_format())
    }
}

impl GenerationSettings {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            max_input_chars: self.max_input_chars,
            summarize_threshold_chars: self.summarize_threshold_chars,
            pre_generation_delay: Duration::from_millis(self.pre_generation_delay_ms),
        }
    }
}

impl UploadSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}
