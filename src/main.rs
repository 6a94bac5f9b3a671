use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voice_batch::controllers::batch::BatchController;
use voice_batch::domain::audio::AudioResourceManager;
use voice_batch::domain::batch::BatchService;
use voice_batch::infrastructure::config::{Config, LogFormat};
use voice_batch::infrastructure::http::{build_router, start_http_server};
use voice_batch::infrastructure::repositories::{T2aTtsRepository, TtsRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting voice batch service on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        endpoint = %config.tts_base_url,
        model = %config.tts_model,
        has_default_api_key = config.tts_api_key.is_some(),
        has_default_group_id = config.tts_group_id.is_some(),
        "Synthesis service configured"
    );

    if config.tts_api_key.is_none() || config.tts_group_id.is_none() {
        tracing::warn!("No default synthesis credentials configured. Every run request must supply its own.");
    }

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    let tts_repo: Arc<dyn TtsRepository> = Arc::new(T2aTtsRepository::new(
        config.tts_base_url.clone(),
        config.tts_model.clone(),
    ));

    // 2. Instantiate services
    let audio = Arc::new(AudioResourceManager::new());
    let batch_service = Arc::new(BatchService::new(tts_repo, audio));

    // 3. Instantiate controllers
    let batch_controller = Arc::new(BatchController::new(batch_service.clone()));

    let app = build_router(config.clone(), batch_service, batch_controller);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voice_batch=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
