use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use crate::domain::{QuestionSet, QuizRequest};
use crate::infrastructure::observability::sanitize_prompt;

use super::prompts::{self, ReplyFormat};
use super::reply_parser::{ReplyError, parse_question_set};
use super::token_counter::estimate_request_tokens;

/// Limits applied around the model calls.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Source text is cut to this many characters before anything is sent.
    pub max_input_chars: usize,
    /// Longer sources are summarized before generation.
    pub summarize_threshold_chars: usize,
    /// Pause before the generation call, keeps two back-to-back calls under
    /// the provider's per-minute limit.
    pub pre_generation_delay: Duration,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_input_chars: 8000,
            summarize_threshold_chars: 4000,
            pre_generation_delay: Duration::from_secs(1),
        }
    }
}

pub struct QuizGenerationService<L>
where
    L: LlmClient + ?Sized,
{
    llm_client: Arc<L>,
    reply_format: ReplyFormat,
    options: GenerationOptions,
}

impl<L> QuizGenerationService<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(llm_client: Arc<L>, reply_format: ReplyFormat, options: GenerationOptions) -> Self {
        Self {
            llm_client,
            reply_format,
            options,
        }
    }

    pub fn reply_format(&self) -> ReplyFormat {
        self.reply_format
    }

    /// Truncates the source to the input budget and, when it is still above
    /// the summarization threshold, replaces it with a model-written summary.
    #[tracing::instrument(skip(self, text), fields(input_chars = text.chars().count()))]
    pub async fn prepare_source(
        &self,
        text: &str,
        model: &str,
    ) -> Result<String, QuizGenerationError> {
        let truncated: String = text.chars().take(self.options.max_input_chars).collect();
        let char_count = truncated.chars().count();

        if char_count <= self.options.summarize_threshold_chars {
            return Ok(truncated);
        }

        let request = CompletionRequest {
            model: model.to_string(),
            system_prompt: prompts::SUMMARIZER_SYSTEM_PROMPT.to_string(),
            user_prompt: prompts::summarization_prompt(&truncated),
            json_output: false,
        };

        tracing::info!(
            char_count,
            threshold = self.options.summarize_threshold_chars,
            estimated_tokens = estimate_request_tokens(&request),
            "Source above threshold, summarizing"
        );

        let summary = self
            .llm_client
            .complete(&request)
            .await
            .map_err(QuizGenerationError::Summarization)?;

        let summary = summary.trim();
        if summary.is_empty() {
            return Err(QuizGenerationError::Summarization(
                LlmClientError::InvalidResponse("empty summary".to_string()),
            ));
        }

        tracing::debug!(summary_chars = summary.chars().count(), "Summary received");

        Ok(summary.to_string())
    }

    #[tracing::instrument(
        skip(self, source_text, request),
        fields(
            subject = %request.subject,
            difficulty = %request.difficulty,
            question_count = request.question_count,
            model = %request.model,
            reply_format = %self.reply_format,
        )
    )]
    pub async fn generate(
        &self,
        source_text: &str,
        request: &QuizRequest,
    ) -> Result<QuestionSet, QuizGenerationError> {
        if source_text.trim().is_empty() {
            tracing::warn!("Generation requested without source text");
            return Err(QuizGenerationError::EmptySource);
        }

        let prepared = self.prepare_source(source_text, &request.model).await?;

        if !self.options.pre_generation_delay.is_zero() {
            tokio::time::sleep(self.options.pre_generation_delay).await;
        }

        let completion = CompletionRequest {
            model: request.model.clone(),
            system_prompt: prompts::generation_system_prompt(self.reply_format).to_string(),
            user_prompt: prompts::generation_prompt(self.reply_format, request, &prepared),
            json_output: self.reply_format == ReplyFormat::Structured,
        };

        tracing::debug!(
            prompt_chars = completion.user_prompt.chars().count(),
            estimated_tokens = estimate_request_tokens(&completion),
            "Requesting quiz generation"
        );

        let reply = self
            .llm_client
            .complete(&completion)
            .await
            .map_err(QuizGenerationError::Generation)?;

        let question_set = parse_question_set(&reply, self.reply_format, request).map_err(
            |source| {
                tracing::error!(
                    error = %source,
                    raw_reply = %sanitize_prompt(&reply),
                    "Model reply failed validation"
                );
                QuizGenerationError::MalformedReply {
                    source,
                    raw: reply.clone(),
                }
            },
        )?;

        if question_set.len() != request.question_count as usize {
            tracing::warn!(
                requested = request.question_count,
                received = question_set.len(),
                "Model returned a different number of questions"
            );
        }

        tracing::info!(questions = question_set.len(), "Quiz generated");

        Ok(question_set)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuizGenerationError {
    #[error("no source text to generate from")]
    EmptySource,
    #[error("summarization: {0}")]
    Summarization(LlmClientError),
    #[error("generation: {0}")]
    Generation(LlmClientError),
    #[error("malformed model reply: {source}")]
    MalformedReply {
        #[source]
        source: ReplyError,
        raw: String,
    },
}

impl QuizGenerationError {
    pub fn llm_error(&self) -> Option<&LlmClientError> {
        match self {
            QuizGenerationError::Summarization(e) | QuizGenerationError::Generation(e) => Some(e),
            _ => None,
        }
    }

    pub fn raw_reply(&self) -> Option<&str> {
        match self {
            QuizGenerationError::MalformedReply { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
