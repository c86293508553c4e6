mod error;
mod extract;
mod health;
mod models;
mod pages;
mod quiz;
mod upload;

pub use error::{ApiError, ErrorResponse};
pub use extract::{ExtractResponse, extract_handler};
pub use health::health_handler;
pub use models::{ModelsResponse, models_handler};
pub use pages::{export_form_handler, index_handler, not_found_handler, quiz_page_handler};
pub use quiz::{GenerateQuizResponse, export_quiz_handler, generate_quiz_handler};
