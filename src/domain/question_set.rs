use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::choice_label::ChoiceLabel;
use super::question::Question;

/// The full quiz generated for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionSetFields")]
pub struct QuestionSet {
    subject: String,
    difficulty: String,
    questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionSetError {
    #[error("subject must not be empty")]
    EmptySubject,
}

impl QuestionSet {
    pub fn new(
        subject: String,
        difficulty: String,
        questions: Vec<Question>,
    ) -> Result<Self, QuestionSetError> {
        if subject.trim().is_empty() {
            return Err(QuestionSetError::EmptySubject);
        }

        Ok(Self {
            subject,
            difficulty,
            questions,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Every label used by any question, in alphabetical order. Labels need
    /// not be contiguous, so `[A, C]` yields two entries.
    pub fn choice_labels(&self) -> Vec<ChoiceLabel> {
        self.questions
            .iter()
            .flat_map(|q| q.choices().iter().map(|c| c.label))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[derive(Deserialize)]
struct QuestionSetFields {
    subject: String,
    #[serde(default)]
    difficulty: String,
    questions: Vec<Question>,
}

impl TryFrom<QuestionSetFields> for QuestionSet {
    type Error = QuestionSetError;

    fn try_from(fields: QuestionSetFields) -> Result<Self, Self::Error> {
        Self::new(fields.subject, fields.difficulty, fields.questions)
    }
}
