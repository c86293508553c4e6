mod choice;
mod choice_label;
mod difficulty;
mod document;
mod document_id;
mod question;
mod question_set;
mod quiz_request;

pub use choice::Choice;
pub use choice_label::{ChoiceLabel, LabelError};
pub use difficulty::Difficulty;
pub use document::{ContentType, Document};
pub use document_id::DocumentId;
pub use question::{Question, QuestionError};
pub use question_set::{QuestionSet, QuestionSetError};
pub use quiz_request::{
    DEFAULT_QUESTION_COUNT, DEFAULT_SUBJECT, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT, QuizRequest,
    QuizRequestError,
};
