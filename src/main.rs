use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use quizcraft::application::services::QuizGenerationService;
use quizcraft::infrastructure::llm::LlmClientFactory;
use quizcraft::infrastructure::observability::{TracingConfig, init_tracing};
use quizcraft::infrastructure::text_processing::CompositeFileLoader;
use quizcraft::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;

    // Without an API key nothing can be generated, so refuse to start.
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::new(environment, &settings.logging))
        .context("failed to initialize tracing")?;

    let llm_client = LlmClientFactory::create(&settings.llm)?;
    let reply_format = settings.llm.reply_format();
    let quiz_service = Arc::new(QuizGenerationService::new(
        llm_client,
        reply_format,
        settings.generation.options(),
    ));

    tracing::info!(
        provider = %settings.llm.provider,
        model = %settings.llm.model,
        reply_format = %reply_format,
        max_input_chars = settings.generation.max_input_chars,
        summarize_threshold_chars = settings.generation.summarize_threshold_chars,
        "Quiz generation configured"
    );

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    let state = AppState {
        file_loader: Arc::new(CompositeFileLoader::with_default_adapters()),
        quiz_service,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
