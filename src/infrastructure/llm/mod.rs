mod gemini_client;
mod groq_client;
mod llm_client_factory;
mod response_status;

pub use gemini_client::{GEMINI_BASE_URL, GeminiClient};
pub use groq_client::{GROQ_BASE_URL, GroqClient};
pub use llm_client_factory::{LlmClientFactory, LlmClientFactoryError};
