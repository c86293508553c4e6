use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::upload::{extract_source, read_upload_form};

#[derive(Serialize)]
pub struct ExtractResponse {
    pub document_id: String,
    pub filename: String,
    pub content_type: &'static str,
    pub characters: usize,
    pub text: String,
}

/// Extraction only: returns the normalized text that generation would use.
#[tracing::instrument(skip(state, multipart))]
pub async fn extract_handler<F, L>(
    State(state): State<AppState<F, L>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let form = read_upload_form(multipart, state.settings.upload.max_file_size_bytes()).await?;
    let upload = form
        .file
        .as_ref()
        .ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    let source = extract_source(&state, upload).await?;

    Ok(Json(ExtractResponse {
        document_id: source.document.id.to_string(),
        filename: source.document.filename,
        content_type: source.document.content_type.as_mime(),
        characters: source.text.chars().count(),
        text: source.text,
    }))
}
