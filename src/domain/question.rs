use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::choice::Choice;
use super::choice_label::ChoiceLabel;

/// One multiple-choice question. Fields are private so every instance has
/// passed [`Question::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionFields")]
pub struct Question {
    question: String,
    choices: Vec<Choice>,
    correct_label: ChoiceLabel,
    explanation: String,
    difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("question has no choices")]
    NoChoices,
    #[error("duplicate choice label {0}")]
    DuplicateLabel(ChoiceLabel),
    #[error("correct label {0} does not match any choice")]
    UnknownCorrectLabel(ChoiceLabel),
}

impl Question {
    pub fn new(
        question: String,
        choices: Vec<Choice>,
        correct_label: ChoiceLabel,
        explanation: String,
        difficulty: String,
    ) -> Result<Self, QuestionError> {
        if choices.is_empty() {
            return Err(QuestionError::NoChoices);
        }

        let mut seen = HashSet::with_capacity(choices.len());
        for choice in &choices {
            if !seen.insert(choice.label) {
                return Err(QuestionError::DuplicateLabel(choice.label));
            }
        }

        if !seen.contains(&correct_label) {
            return Err(QuestionError::UnknownCorrectLabel(correct_label));
        }

        Ok(Self {
            question,
            choices,
            correct_label,
            explanation,
            difficulty,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn correct_label(&self) -> ChoiceLabel {
        self.correct_label
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn choice(&self, label: ChoiceLabel) -> Option<&Choice> {
        self.choices.iter().find(|c| c.label == label)
    }

    pub fn correct_choice(&self) -> Option<&Choice> {
        self.choice(self.correct_label)
    }
}

#[derive(Deserialize)]
struct QuestionFields {
    question: String,
    choices: Vec<Choice>,
    correct_label: ChoiceLabel,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    difficulty: String,
}

impl TryFrom<QuestionFields> for Question {
    type Error = QuestionError;

    fn try_from(fields: QuestionFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.question,
            fields.choices,
            fields.correct_label,
            fields.explanation,
            fields.difficulty,
        )
    }
}
