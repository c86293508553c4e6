#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use quizcraft::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use quizcraft::application::services::{GenerationOptions, QuizGenerationService, ReplyFormat};
use quizcraft::infrastructure::text_processing::CompositeFileLoader;
use quizcraft::presentation::AppState;
use quizcraft::presentation::config::{
    GenerationSettings, LlmProvider, LlmSettings, LoggingSettings, ServerSettings, Settings,
    UploadSettings,
};

pub const WATER_CYCLE: &str =
    "The water cycle consists of evaporation, condensation, precipitation, and collection.";

pub const WATER_CYCLE_REPLY: &str = r#"{
  "subject": "Science",
  "difficulty": "Easy",
  "questions": [
    {
      "question": "Which stage turns liquid water into vapour?",
      "choices": [
        {"label": "A", "text": "Condensation"},
        {"label": "B", "text": "Evaporation"},
        {"label": "C", "text": "Collection"},
        {"label": "D", "text": "Precipitation"}
      ],
      "correct_label": "B",
      "explanation": "Evaporation turns liquid water into vapour.",
      "difficulty": "Easy"
    },
    {
      "question": "What forms clouds?",
      "choices": [
        {"label": "A", "text": "Condensation"},
        {"label": "B", "text": "Collection"},
        {"label": "C", "text": "Evaporation"}
      ],
      "correct_label": "a",
      "explanation": "Vapour condenses into droplets.",
      "difficulty": "Easy"
    },
    {
      "question": "Rain and snow are forms of what?",
      "choices": [
        {"label": "A", "text": "Collection"},
        {"label": "B", "text": "Evaporation"},
        {"label": "C", "text": "Condensation"},
        {"label": "D", "text": "Precipitation"}
      ],
      "correct_label": " d)",
      "explanation": "Water falling from clouds is precipitation.",
      "difficulty": "Easy"
    }
  ]
}"#;

/// Replays canned replies in order and records every request it receives.
pub struct ScriptedLlmClient {
    replies: Mutex<VecDeque<Result<String, LlmClientError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlmClient {
    pub fn new(replies: Vec<Result<String, LlmClientError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmClientError::InvalidResponse("no scripted reply".into())))
    }
}

pub fn test_options() -> GenerationOptions {
    GenerationOptions {
        max_input_chars: 8000,
        summarize_threshold_chars: 4000,
        pre_generation_delay: std::time::Duration::ZERO,
    }
}

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        llm: LlmSettings {
            provider: LlmProvider::Groq,
            api_key: "test-key".to_string(),
            model: "llama3-8b-8192".to_string(),
            base_url: None,
            temperature: 0.2,
            request_timeout_secs: 5,
            reply_format: None,
        },
        generation: GenerationSettings {
            max_input_chars: 8000,
            summarize_threshold_chars: 4000,
            pre_generation_delay_ms: 0,
            default_question_count: 3,
        },
        upload: UploadSettings {
            max_file_size_mb: 1,
        },
        logging: LoggingSettings {
            level: String::new(),
            enable_json: false,
        },
    }
}

pub fn test_state(
    llm_client: Arc<ScriptedLlmClient>,
) -> AppState<CompositeFileLoader, ScriptedLlmClient> {
    AppState {
        file_loader: Arc::new(CompositeFileLoader::with_default_adapters()),
        quiz_service: Arc::new(QuizGenerationService::new(
            llm_client,
            ReplyFormat::Structured,
            test_options(),
        )),
        settings: test_settings(),
    }
}
