use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ModelsResponse {
    pub provider: &'static str,
    pub default_model: String,
    pub models: Vec<&'static str>,
    pub reply_format: &'static str,
}

pub async fn models_handler<F, L>(State(state): State<AppState<F, L>>) -> impl IntoResponse
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let llm = &state.settings.llm;

    (
        StatusCode::OK,
        Json(ModelsResponse {
            provider: llm.provider.as_str(),
            default_model: llm.model.clone(),
            models: llm.provider.supported_models().to_vec(),
            reply_format: state.quiz_service.reply_format().as_str(),
        }),
    )
}
