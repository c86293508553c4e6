use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::{
    ContentType, DEFAULT_SUBJECT, Difficulty, Document, QuizRequest, QuizRequestError,
};
use crate::infrastructure::text_processing::normalize_text;
use crate::presentation::state::AppState;

use super::error::ApiError;

/// The uploaded file of a multipart form.
pub struct FileUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// All fields of the upload form. Missing parameters fall back to defaults
/// when the quiz request is built.
#[derive(Default)]
pub struct UploadForm {
    pub file: Option<FileUpload>,
    pub subject: Option<String>,
    pub difficulty: Option<String>,
    pub question_count: Option<String>,
    pub model: Option<String>,
}

/// Text pulled out of an upload, already normalized.
pub struct ExtractedSource {
    pub document: Document,
    pub text: String,
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(format!("Failed to read multipart: {}", e.body_text()))
    }
}

pub async fn read_upload_form(
    mut multipart: Multipart,
    max_file_size_bytes: usize,
) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;

                if data.len() > max_file_size_bytes {
                    return Err(ApiError::PayloadTooLarge(format!(
                        "File exceeds {} bytes",
                        max_file_size_bytes
                    )));
                }

                tracing::debug!(
                    filename = %filename,
                    content_type = ?content_type,
                    bytes = data.len(),
                    "File data received"
                );

                form.file = Some(FileUpload {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "subject" | "difficulty" | "question_count" | "model" => {
                let value = field.text().await.map_err(multipart_error)?;
                let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
                match name.as_str() {
                    "subject" => form.subject = value,
                    "difficulty" => form.difficulty = value,
                    "question_count" => form.question_count = value,
                    _ => form.model = value,
                }
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

/// Detects the type, runs the matching extractor and normalizes the result.
/// An unrecognized type is rejected before any extraction is attempted.
pub async fn extract_source<F, L>(
    state: &AppState<F, L>,
    upload: &FileUpload,
) -> Result<ExtractedSource, ApiError>
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let content_type = ContentType::detect(&upload.filename, upload.content_type.as_deref())
        .ok_or_else(|| {
            ApiError::UnsupportedMediaType(
                upload
                    .content_type
                    .clone()
                    .unwrap_or_else(|| upload.filename.clone()),
            )
        })?;

    let document = Document::new(
        upload.filename.clone(),
        content_type,
        upload.data.len() as u64,
    );

    let raw = state
        .file_loader
        .extract_text(&upload.data, &document)
        .await?;

    let text = normalize_text(&raw, state.settings.generation.max_input_chars);

    tracing::info!(
        document_id = %document.id,
        filename = %document.filename,
        content_type = document.content_type.as_mime(),
        raw_chars = raw.chars().count(),
        characters = text.chars().count(),
        "Text extracted"
    );

    Ok(ExtractedSource { document, text })
}

/// Builds the generation parameters from the form, applying defaults and
/// checking the model against the configured provider.
pub fn build_quiz_request<F, L>(
    state: &AppState<F, L>,
    form: &UploadForm,
) -> Result<QuizRequest, ApiError>
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let difficulty = match form.difficulty.as_deref() {
        Some(raw) => raw.parse::<Difficulty>().map_err(ApiError::BadRequest)?,
        None => Difficulty::default(),
    };

    let question_count = match form.question_count.as_deref() {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            ApiError::BadRequest(format!("Invalid question count: {}", raw))
        })?,
        None => state.settings.generation.default_question_count,
    };

    let provider = state.settings.llm.provider;
    let model = form
        .model
        .clone()
        .unwrap_or_else(|| state.settings.llm.model.clone());
    if !provider.supports_model(&model) {
        return Err(ApiError::BadRequest(format!(
            "Model {} is not available for provider {}",
            model, provider
        )));
    }

    let subject = form.subject.as_deref().unwrap_or(DEFAULT_SUBJECT);

    QuizRequest::new(subject, difficulty, question_count, model)
        .map_err(|e: QuizRequestError| ApiError::BadRequest(e.to_string()))
}
