use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::QuizGenerationService;
use crate::presentation::config::Settings;

pub struct AppState<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    pub file_loader: Arc<F>,
    pub quiz_service: Arc<QuizGenerationService<L>>,
    pub settings: Settings,
}

impl<F, L> Clone for AppState<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            file_loader: Arc::clone(&self.file_loader),
            quiz_service: Arc::clone(&self.quiz_service),
            settings: self.settings.clone(),
        }
    }
}
