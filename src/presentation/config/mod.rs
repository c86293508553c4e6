mod environment;
mod llm_provider;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use llm_provider::LlmProvider;
pub use settings::{
    GenerationSettings, LlmSettings, LoggingSettings, ServerSettings, Settings, SettingsError,
    UploadSettings,
};
