use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{
    Choice, ChoiceLabel, LabelError, Question, QuestionError, QuestionSet, QuestionSetError,
    QuizRequest,
};

use super::prompts::ReplyFormat;

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("reply contains no JSON object")]
    NoJsonObject,
    #[error("reply is not valid quiz JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("reply contains no questions")]
    NoQuestions,
    #[error("question {index}: {source}")]
    Label {
        index: usize,
        #[source]
        source: LabelError,
    },
    #[error("question {index}: has more than 26 options")]
    TooManyChoices { index: usize },
    #[error("question {index}: {source}")]
    Question {
        index: usize,
        #[source]
        source: QuestionError,
    },
    #[error(transparent)]
    QuestionSet(#[from] QuestionSetError),
}

/// Both reply shapes the prompts ask for: `choices` of labelled objects with
/// `correct_label`, or `options` (a list or a letter-keyed map) with `answer`.
#[derive(Deserialize)]
struct RawQuestionSet {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(alias = "mcqs")]
    questions: Vec<RawQuestion>,
}

#[derive(Deserialize)]
struct RawQuestion {
    #[serde(alias = "mcq")]
    question: String,
    #[serde(alias = "options")]
    choices: RawChoices,
    #[serde(alias = "answer", alias = "correct")]
    correct_label: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    difficulty: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawChoices {
    List(Vec<RawChoice>),
    Keyed(BTreeMap<String, String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawChoice {
    Labeled { label: String, text: String },
    Bare(String),
}

/// Parses a model reply into a validated [`QuestionSet`]. Set-level fields the
/// model left out are taken from the request.
pub fn parse_question_set(
    raw: &str,
    format: ReplyFormat,
    request: &QuizRequest,
) -> Result<QuestionSet, ReplyError> {
    let json = match format {
        ReplyFormat::Structured => strip_code_fence(raw),
        ReplyFormat::FreeText => extract_json_object(raw).ok_or(ReplyError::NoJsonObject)?,
    };

    let parsed: RawQuestionSet = serde_json::from_str(json)?;

    if parsed.questions.is_empty() {
        return Err(ReplyError::NoQuestions);
    }

    let set_difficulty = non_blank(parsed.difficulty)
        .unwrap_or_else(|| request.difficulty.as_str().to_string());

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| into_question(index + 1, q, &set_difficulty))
        .collect::<Result<Vec<_>, _>>()?;

    let subject = non_blank(parsed.subject).unwrap_or_else(|| request.subject.clone());

    Ok(QuestionSet::new(subject, set_difficulty, questions)?)
}

/// Cuts the outermost `{ ... }` out of free text, dropping any prose or
/// markdown fences around it.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // The info string (`json`, `JSON`, ...) runs to the end of the opening line.
    let body = match rest.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('{') => body,
        _ => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn into_question(
    index: usize,
    raw: RawQuestion,
    set_difficulty: &str,
) -> Result<Question, ReplyError> {
    let label_err = |source: LabelError| ReplyError::Label { index, source };

    let choices = match raw.choices {
        RawChoices::List(items) => items
            .into_iter()
            .enumerate()
            .map(|(position, item)| match item {
                RawChoice::Labeled { label, text } => ChoiceLabel::parse(&label)
                    .map(|label| Choice::new(label, text))
                    .map_err(label_err),
                RawChoice::Bare(text) => ChoiceLabel::from_index(position)
                    .map(|label| Choice::new(label, text))
                    .ok_or(ReplyError::TooManyChoices { index }),
            })
            .collect::<Result<Vec<_>, _>>()?,
        RawChoices::Keyed(map) => map
            .into_iter()
            .map(|(label, text)| {
                ChoiceLabel::parse(&label)
                    .map(|label| Choice::new(label, text))
                    .map_err(label_err)
            })
            .collect::<Result<Vec<_>, _>>()?,
    };

    let correct_label = ChoiceLabel::parse(&raw.correct_label).map_err(label_err)?;
    let difficulty = non_blank(raw.difficulty).unwrap_or_else(|| set_difficulty.to_string());

    Question::new(
        raw.question,
        choices,
        correct_label,
        raw.explanation,
        difficulty,
    )
    .map_err(|source| ReplyError::Question { index, source })
}
