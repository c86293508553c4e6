use maud::{Markup, html};

use crate::domain::{DEFAULT_SUBJECT, Difficulty, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT};
use crate::presentation::export::{ExportFormat, QuizTable};

/// What the upload form needs to know about the running configuration.
pub struct FormOptions<'a> {
    pub models: &'a [&'static str],
    pub default_model: &'a str,
    pub default_question_count: u32,
    pub max_file_size_mb: usize,
}

pub fn upload_form(options: &FormOptions<'_>) -> Markup {
    html! {
        form.upload method="post" action="/quiz" enctype="multipart/form-data" {
            label.wide {
                "Upload PDF/TXT/DOCX"
                input type="file" name="file" accept=".pdf,.txt,.docx" required;
                small { "Maximum " (options.max_file_size_mb) " MB. Recommended: 10 pages or 8000 characters." }
            }
            label {
                "Subject"
                input type="text" name="subject" value=(DEFAULT_SUBJECT);
            }
            label {
                "Difficulty"
                select name="difficulty" {
                    @for difficulty in Difficulty::ALL {
                        option value=(difficulty.as_str()) selected[difficulty == Difficulty::default()] {
                            (difficulty.as_str())
                        }
                    }
                }
            }
            label {
                "Number of Questions"
                input type="number" name="question_count"
                    min=(MIN_QUESTION_COUNT) max=(MAX_QUESTION_COUNT)
                    value=(options.default_question_count);
            }
            label {
                "Model"
                select name="model" {
                    @for model in options.models {
                        option value=(model) selected[*model == options.default_model] { (model) }
                    }
                }
            }
            button.wide type="submit" { "Generate MCQs" }
        }
    }
}

pub fn tips() -> Markup {
    html! {
        section {
            h3 { "Tips for Best Results:" }
            ol {
                li { "Use clear, well-structured source material" }
                li { "Keep documents under 10 pages for best performance" }
                li { "Long documents are summarized before questions are written" }
                li { "Start with 5-10 questions to test the system" }
            }
        }
    }
}

pub fn quiz_table(table: &QuizTable) -> Markup {
    html! {
        table {
            thead {
                tr {
                    @for header in &table.headers {
                        th { (header) }
                    }
                }
            }
            tbody {
                @for row in &table.rows {
                    tr {
                        @for cell in row {
                            td { (cell) }
                        }
                    }
                }
            }
        }
    }
}

fn download_button(format: ExportFormat, quiz_json: &str, caption: &str) -> Markup {
    let action = match format {
        ExportFormat::Json => "/quiz/export/json",
        ExportFormat::Csv => "/quiz/export/csv",
    };

    html! {
        form method="post" action=(action) {
            input type="hidden" name="quiz" value=(quiz_json);
            button type="submit" { (caption) }
        }
    }
}

pub fn results(source_characters: usize, table: &QuizTable, quiz_json: &str) -> Markup {
    html! {
        p.notice.success {
            "Processed " (source_characters) " characters. "
            "Successfully generated " (table.rows.len()) " MCQs!"
        }
        (quiz_table(table))
        div.downloads {
            (download_button(ExportFormat::Json, quiz_json, "Download JSON"))
            (download_button(ExportFormat::Csv, quiz_json, "Download CSV"))
        }
    }
}

pub fn error_panel(message: &str, raw_reply: Option<&str>) -> Markup {
    html! {
        div.notice.error {
            strong { (message) }
            @if let Some(raw) = raw_reply {
                details {
                    summary { "Raw model reply" }
                    pre { (raw) }
                }
            }
        }
    }
}
