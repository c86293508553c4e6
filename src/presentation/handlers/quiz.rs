use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::QuestionSet;
use crate::presentation::export::{ExportFormat, QuizTable};
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::upload::{UploadForm, build_quiz_request, extract_source, read_upload_form};

#[derive(Serialize)]
pub struct GenerateQuizResponse {
    pub source_characters: usize,
    pub quiz: QuestionSet,
    pub table: QuizTable,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub format: ExportFormat,
}

/// Upload → extract → normalize → generate → validate, shared by the JSON
/// API and the HTML form.
pub async fn generate_from_upload<F, L>(
    state: &AppState<F, L>,
    form: &UploadForm,
) -> Result<(usize, QuestionSet), ApiError>
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let upload = form
        .file
        .as_ref()
        .ok_or_else(|| ApiError::BadRequest("Please upload a file before generating.".to_string()))?;

    let source = extract_source(state, upload).await?;
    let request = build_quiz_request(state, form)?;

    let quiz = state.quiz_service.generate(&source.text, &request).await?;

    Ok((source.text.chars().count(), quiz))
}

#[tracing::instrument(skip(state, multipart))]
pub async fn generate_quiz_handler<F, L>(
    State(state): State<AppState<F, L>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let form = read_upload_form(multipart, state.settings.upload.max_file_size_bytes()).await?;
    let (source_characters, quiz) = generate_from_upload(&state, &form).await?;
    let table = QuizTable::from_question_set(&quiz);

    Ok(Json(GenerateQuizResponse {
        source_characters,
        quiz,
        table,
    }))
}

/// Renders a previously generated quiz as a downloadable file.
pub async fn export_quiz_handler(
    Query(query): Query<ExportQuery>,
    Json(quiz): Json<QuestionSet>,
) -> Result<Response, ApiError> {
    tracing::debug!(format = ?query.format, questions = quiz.len(), "Exporting quiz");
    Ok(query.format.download(&quiz)?)
}
