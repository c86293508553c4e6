mod file_loader;
mod llm_client;

pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{CompletionRequest, LlmClient, LlmClientError};
