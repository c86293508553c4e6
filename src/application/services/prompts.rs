use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::QuizRequest;

/// How the hosted model is asked to emit the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyFormat {
    /// Provider JSON mode; the reply body is the object itself.
    Structured,
    /// Plain completion; the JSON object has to be cut out of the reply text.
    FreeText,
}

impl ReplyFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyFormat::Structured => "structured",
            ReplyFormat::FreeText => "free_text",
        }
    }
}

impl FromStr for ReplyFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "structured" => Ok(ReplyFormat::Structured),
            "free_text" | "freetext" => Ok(ReplyFormat::FreeText),
            other => Err(format!(
                "Invalid reply format: {}. Expected: structured or free_text",
                other
            )),
        }
    }
}

impl fmt::Display for ReplyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const SUMMARIZER_SYSTEM_PROMPT: &str = "You are a precise academic summarizer. \
Write a concise summary of the content you are given and keep every key fact, \
definition, name and number.";

const SUMMARIZER_USER_TEMPLATE: &str = "Summarize the following content:\n\n{content}";

const STRUCTURED_SYSTEM_PROMPT: &str = "You are an expert test item writer. \
You write clear multiple-choice questions grounded strictly in the source content. \
Every question has exactly one correct choice. You answer with a single JSON object and nothing else.";

const STRUCTURED_USER_TEMPLATE: &str = "Subject: {subject}\n\
Difficulty: {difficulty}\n\
Number of Questions: {n}\n\n\
Source Content: {content}\n\n\
Return JSON: {format_instructions}";

const FREE_TEXT_SYSTEM_PROMPT: &str = "You are an expert MCQ maker. \
You only ask about facts stated in the text you are given and never repeat a question.";

const FREE_TEXT_USER_TEMPLATE: &str = "Text:\n{content}\n\n\
Create a quiz of {n} multiple choice questions for {subject} students at {difficulty} difficulty. \
Check that every question conforms to the text. \
Format your whole response like RESPONSE_JSON below and use it as a guide. \
Make exactly {n} questions.\n\n\
### RESPONSE_JSON\n{format_instructions}";

const STRUCTURED_FORMAT_INSTRUCTIONS: &str = r#"an object with this shape:
{
  "subject": string,
  "difficulty": string,
  "questions": [
    {
      "question": string,
      "choices": [{"label": "A", "text": string}, {"label": "B", "text": string}, {"label": "C", "text": string}, {"label": "D", "text": string}],
      "correct_label": single uppercase letter matching one choice label,
      "explanation": string,
      "difficulty": string
    }
  ]
}"#;

const FREE_TEXT_FORMAT_INSTRUCTIONS: &str = r#"{
  "subject": "<subject>",
  "difficulty": "<difficulty>",
  "questions": [
    {
      "question": "<question text>",
      "options": ["<choice A>", "<choice B>", "<choice C>", "<choice D>"],
      "answer": "<letter of the correct option>",
      "explanation": "<why the answer is correct>"
    }
  ]
}"#;

pub fn summarization_prompt(content: &str) -> String {
    SUMMARIZER_USER_TEMPLATE.replace("{content}", content)
}

pub fn generation_system_prompt(format: ReplyFormat) -> &'static str {
    match format {
        ReplyFormat::Structured => STRUCTURED_SYSTEM_PROMPT,
        ReplyFormat::FreeText => FREE_TEXT_SYSTEM_PROMPT,
    }
}

/// Renders the user prompt for a generation call. The source content is
/// substituted last so placeholders inside it are left alone.
pub fn generation_prompt(format: ReplyFormat, request: &QuizRequest, content: &str) -> String {
    let (template, instructions) = match format {
        ReplyFormat::Structured => (STRUCTURED_USER_TEMPLATE, STRUCTURED_FORMAT_INSTRUCTIONS),
        ReplyFormat::FreeText => (FREE_TEXT_USER_TEMPLATE, FREE_TEXT_FORMAT_INSTRUCTIONS),
    };

    template
        .replace("{format_instructions}", instructions)
        .replace("{subject}", &request.subject)
        .replace("{difficulty}", request.difficulty.as_str())
        .replace("{n}", &request.question_count.to_string())
        .replace("{content}", content)
}
