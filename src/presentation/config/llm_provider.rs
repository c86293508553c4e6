use std::fmt;

use serde::Deserialize;

use crate::application::services::ReplyFormat;

/// Hosted model vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Groq,
    Gemini,
}

const GROQ_MODELS: &[&str] = &["llama3-8b-8192", "llama3-70b-8192"];
const GEMINI_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro"];

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "groq",
            LlmProvider::Gemini => "gemini",
        }
    }

    /// Models a user may pick; the first one is the default.
    pub fn supported_models(&self) -> &'static [&'static str] {
        match self {
            LlmProvider::Groq => GROQ_MODELS,
            LlmProvider::Gemini => GEMINI_MODELS,
        }
    }

    pub fn default_model(&self) -> &'static str {
        self.supported_models()[0]
    }

    pub fn supports_model(&self, model: &str) -> bool {
        self.supported_models().contains(&model)
    }

    /// Groq is driven in JSON mode; Gemini replies are cut out of free text.
    pub fn default_reply_format(&self) -> ReplyFormat {
        match self {
            LlmProvider::Groq => ReplyFormat::Structured,
            LlmProvider::Gemini => ReplyFormat::FreeText,
        }
    }

    /// Variable consulted when `llm.api_key` is not configured.
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "GROQ_API_KEY",
            LlmProvider::Gemini => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
