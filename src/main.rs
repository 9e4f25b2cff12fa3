use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use longform_tts_backend::controllers::tts::TtsController;
use longform_tts_backend::domain::tts::TtsService;
use longform_tts_backend::infrastructure::config::{Config, LogFormat, TtsBackend};
use longform_tts_backend::infrastructure::http::start_http_server;
use longform_tts_backend::infrastructure::repositories::{
    ChunkSynthesizer, GeminiTtsRepository, OpenAiTtsRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Long-Form TTS Backend on {}:{}",
        config.host,
        config.port
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the backend adapter selected by configuration
    let synthesizer: Arc<dyn ChunkSynthesizer> = match config.tts_backend {
        TtsBackend::Gemini => {
            let api_key = config
                .gemini_api_key
                .clone()
                .ok_or("GEMINI_API_KEY must be set when TTS_BACKEND=gemini")?;
            tracing::info!(
                model = %config.gemini_model,
                voice = %config.gemini_voice,
                chunk_limit = config.gemini_chunk_limit,
                "Using Gemini TTS backend"
            );
            Arc::new(GeminiTtsRepository::new(
                api_key,
                config.gemini_model.clone(),
                config.gemini_voice.clone(),
                config.gemini_chunk_limit,
            ))
        }
        TtsBackend::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or("OPENAI_API_KEY must be set when TTS_BACKEND=openai")?;
            tracing::info!(
                model = %config.openai_tts_model,
                voice = %config.openai_tts_voice,
                chunk_limit = config.openai_chunk_limit,
                "Using OpenAI TTS backend"
            );
            let openai_config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
            Arc::new(OpenAiTtsRepository::new(
                Arc::new(async_openai::Client::with_config(openai_config)),
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
                config.openai_chunk_limit,
            ))
        }
    };

    // 2. Instantiate services (inject the adapter)
    let tts_service = Arc::new(TtsService::new(synthesizer));

    // 3. Instantiate controllers (inject services)
    let tts_controller = Arc::new(TtsController::new(tts_service, config.max_text_length));

    // Start HTTP server with all routes
    start_http_server(config, tts_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "longform_tts_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "longform_tts_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
