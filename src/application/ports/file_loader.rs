use std::time::Duration;

use async_trait::async_trait;

use crate::domain::Document;

/// Turns the bytes of one uploaded document into plain text. An empty string
/// is a valid result, e.g. a scanned PDF without a text layer.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("extraction did not finish within {0:?}")]
    TimedOut(Duration),
}
