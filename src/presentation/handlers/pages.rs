use axum::Form;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{Markup, html};
use serde::Deserialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::QuestionSet;
use crate::presentation::export::{ExportFormat, QuizTable, export_json};
use crate::presentation::state::AppState;
use crate::presentation::views;

use super::error::ApiError;
use super::quiz::generate_from_upload;
use super::upload::read_upload_form;

const PAGE_TITLE: &str = "MCQ Generator";

#[derive(Deserialize)]
pub struct ExportForm {
    pub quiz: String,
}

fn form_section<F, L>(state: &AppState<F, L>) -> Markup
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let options = views::FormOptions {
        models: state.settings.llm.provider.supported_models(),
        default_model: &state.settings.llm.model,
        default_question_count: state.settings.generation.default_question_count,
        max_file_size_mb: state.settings.upload.max_file_size_mb,
    };

    views::upload_form(&options)
}

pub async fn index_handler<F, L>(State(state): State<AppState<F, L>>) -> Markup
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    views::page(
        PAGE_TITLE,
        html! {
            (form_section(&state))
            (views::tips())
        },
    )
}

/// HTML counterpart of the generate endpoint. Failures are rendered above
/// the form with the status the JSON API would use.
#[tracing::instrument(skip(state, multipart))]
pub async fn quiz_page_handler<F, L>(
    State(state): State<AppState<F, L>>,
    multipart: Multipart,
) -> (StatusCode, Markup)
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let outcome = match read_upload_form(multipart, state.settings.upload.max_file_size_bytes())
        .await
    {
        Ok(form) => generate_from_upload(&state, &form).await,
        Err(e) => Err(e),
    };

    let rendered = outcome.and_then(|(source_characters, quiz)| {
        let quiz_json = export_json(&quiz)?;
        let table = QuizTable::from_question_set(&quiz);
        Ok(views::results(source_characters, &table, &quiz_json))
    });

    match rendered {
        Ok(results) => (
            StatusCode::OK,
            views::page(
                PAGE_TITLE,
                html! {
                    (results)
                    (form_section(&state))
                },
            ),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Quiz page request failed");
            (
                e.status(),
                views::page(
                    PAGE_TITLE,
                    html! {
                        (views::error_panel(&e.to_string(), e.raw_reply()))
                        (form_section(&state))
                        (views::tips())
                    },
                ),
            )
        }
    }
}

/// Download buttons post the quiz JSON back; the export is re-rendered from it.
pub async fn export_form_handler(
    Path(format): Path<String>,
    Form(form): Form<ExportForm>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = format.parse().map_err(ApiError::BadRequest)?;
    let quiz: QuestionSet = serde_json::from_str(&form.quiz)
        .map_err(|e| ApiError::BadRequest(format!("Invalid quiz payload: {}", e)))?;

    Ok(format.download(&quiz)?)
}

pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        views::page(PAGE_TITLE, views::error_panel("Page not found", None)),
    )
}
