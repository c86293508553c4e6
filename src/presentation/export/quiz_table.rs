use serde::Serialize;

use crate::domain::{ChoiceLabel, QuestionSet};

/// Flat, one-row-per-question view of a quiz: `#`, `Question`, one
/// `Option X` column per label used anywhere in the quiz, `Answer`,
/// `Explanation`. Cells are keyed by label; a question without that label
/// gets an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("encoding: {0}")]
    Encoding(String),
}

impl QuizTable {
    pub fn from_question_set(set: &QuestionSet) -> Self {
        let labels: Vec<ChoiceLabel> = set.choice_labels();

        let mut headers = Vec::with_capacity(labels.len() + 4);
        headers.push("#".to_string());
        headers.push("Question".to_string());
        headers.extend(labels.iter().map(|label| format!("Option {label}")));
        headers.push("Answer".to_string());
        headers.push("Explanation".to_string());

        let rows = set
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let mut row = Vec::with_capacity(headers.len());
                row.push((index + 1).to_string());
                row.push(question.question().to_string());
                row.extend(labels.iter().map(|label| {
                    question
                        .choice(*label)
                        .map(|c| c.text.clone())
                        .unwrap_or_default()
                }));
                row.push(question.correct_label().to_string());
                row.push(question.explanation().to_string());
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn option_column_count(&self) -> usize {
        self.headers
            .iter()
            .filter(|h| h.starts_with("Option "))
            .count()
    }

    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Encoding(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
    }
}

/// Pretty-printed JSON of the whole structured quiz.
pub fn export_json(set: &QuestionSet) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(set)?)
}
