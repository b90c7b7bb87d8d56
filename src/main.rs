mod config;
mod handlers;
mod models;
mod services;
mod web; // Form page + multipart submission

use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;

use config::AppConfig;
use handlers::AdviceHandler;
use services::{GeminiService, InferenceService};
use web::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables first so RUST_LOG from .env is honored
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Nutrition Assistant...");

    let config = AppConfig::from_env()?;

    let gemini = GeminiService::new(
        config.google_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_api_base.clone(),
    );
    log::info!("✅ Gemini service initialized with model: {}", gemini.model());
    let ai: Arc<dyn InferenceService> = Arc::new(gemini);

    let advice_handler = Arc::new(AdviceHandler::new(ai));
    let app = create_router(advice_handler, config.max_upload_bytes());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("🌐 Nutrition Assistant listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl+C: {}", e);
            }
        })
        .await?;

    log::info!("🛑 Shutting down...");

    Ok(())
}
