use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{FileLoaderError, LlmClientError};
use crate::application::services::QuizGenerationError;
use crate::presentation::export::ExportError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Unparsed model output, present when the reply failed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_reply: Option<String>,
}

/// Every way a request can fail, with the status it is reported under.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),
    #[error("Error processing file: {0}")]
    Extraction(String),
    #[error("Generation failed: {0}")]
    Generation(#[from] QuizGenerationError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Generation(QuizGenerationError::EmptySource) => StatusCode::BAD_REQUEST,
            ApiError::Generation(QuizGenerationError::MalformedReply { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Generation(e) => match e.llm_error() {
                Some(LlmClientError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
                Some(LlmClientError::MissingApiKey) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_GATEWAY,
            },
            ApiError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            ApiError::Generation(e) => e.raw_reply(),
            _ => None,
        }
    }
}

impl From<FileLoaderError> for ApiError {
    fn from(error: FileLoaderError) -> Self {
        match error {
            FileLoaderError::UnsupportedContentType(ct) => ApiError::UnsupportedMediaType(ct),
            FileLoaderError::ExtractionFailed(reason) => ApiError::Extraction(reason),
            timed_out @ FileLoaderError::TimedOut(_) => ApiError::Extraction(timed_out.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Request failed");
        } else {
            tracing::warn!(error = %self, status = %status, "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                raw_reply: self.raw_reply().map(str::to_string),
            }),
        )
            .into_response()
    }
}
