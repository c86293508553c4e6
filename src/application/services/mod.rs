pub mod prompts;
mod quiz_generation_service;
mod reply_parser;
mod token_counter;

pub use prompts::ReplyFormat;
pub use quiz_generation_service::{GenerationOptions, QuizGenerationError, QuizGenerationService};
pub use reply_parser::{ReplyError, extract_json_object, parse_question_set};
pub use token_counter::{count_tokens, estimate_request_tokens};
