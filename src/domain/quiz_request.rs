use super::difficulty::Difficulty;

pub const MIN_QUESTION_COUNT: u32 = 1;
pub const MAX_QUESTION_COUNT: u32 = 50;
pub const DEFAULT_QUESTION_COUNT: u32 = 10;
pub const DEFAULT_SUBJECT: &str = "General Knowledge";

/// Parameters of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub subject: String,
    pub difficulty: Difficulty,
    pub question_count: u32,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizRequestError {
    #[error("subject must not be empty")]
    EmptySubject,
    #[error(
        "question count must be between {min} and {max}, got {0}",
        min = MIN_QUESTION_COUNT,
        max = MAX_QUESTION_COUNT
    )]
    QuestionCountOutOfRange(u32),
}

impl QuizRequest {
    pub fn new(
        subject: impl Into<String>,
        difficulty: Difficulty,
        question_count: u32,
        model: impl Into<String>,
    ) -> Result<Self, QuizRequestError> {
        let subject = subject.into().trim().to_string();
        if subject.is_empty() {
            return Err(QuizRequestError::EmptySubject);
        }

        if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&question_count) {
            return Err(QuizRequestError::QuestionCountOutOfRange(question_count));
        }

        Ok(Self {
            subject,
            difficulty,
            question_count,
            model: model.into(),
        })
    }
}
