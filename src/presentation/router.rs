use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    export_form_handler, export_quiz_handler, extract_handler, generate_quiz_handler,
    health_handler, index_handler, models_handler, not_found_handler, quiz_page_handler,
};
use crate::presentation::state::AppState;

/// Room for the non-file form fields and multipart framing.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router<F, L>(state: AppState<F, L>) -> Router
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit =
        DefaultBodyLimit::max(state.settings.upload.max_file_size_bytes() + FORM_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(index_handler::<F, L>))
        .route("/quiz", post(quiz_page_handler::<F, L>))
        .route("/quiz/export/{format}", post(export_form_handler))
        .route("/health", get(health_handler::<F, L>))
        .route("/api/v1/models", get(models_handler::<F, L>))
        .route("/api/v1/extract", post(extract_handler::<F, L>))
        .route("/api/v1/quizzes", post(generate_quiz_handler::<F, L>))
        .route("/api/v1/quizzes/export", post(export_quiz_handler))
        .fallback(not_found_handler)
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
