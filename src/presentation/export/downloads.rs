use std::str::FromStr;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::domain::QuestionSet;

use super::quiz_table::{ExportError, QuizTable, export_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "mcqs.json",
            ExportFormat::Csv => "mcqs.csv",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn render(&self, set: &QuestionSet) -> Result<String, ExportError> {
        match self {
            ExportFormat::Json => export_json(set),
            ExportFormat::Csv => QuizTable::from_question_set(set).to_csv(),
        }
    }

    /// Attachment response carrying the rendered export.
    pub fn download(&self, set: &QuestionSet) -> Result<Response, ExportError> {
        let body = self.render(set)?;
        let disposition = format!("attachment; filename=\"{}\"", self.file_name());

        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.mime().to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            body,
        )
            .into_response())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!(
                "Invalid export format: {}. Expected: json or csv",
                other
            )),
        }
    }
}
