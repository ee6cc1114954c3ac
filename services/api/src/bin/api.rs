//! services/api/src/bin/api.rs

use api_lib::{
    adapters::gemini::GeminiReadingAdapter,
    config::Config,
    error::ApiError,
    web::{
        create_draw_handler, reading_handler, reset_draw_handler, select_slot_handler,
        state::AppState,
    },
};
use axum::{routing::post, Router};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Generation Adapter ---
    let http = reqwest::Client::builder()
        .timeout(config.generation_timeout)
        .build()
        .map_err(|e| ApiError::Internal(format!("Failed to build HTTP client: {e}")))?;
    let reading_adapter = Arc::new(GeminiReadingAdapter::new(
        http,
        config.gemini_api_base.clone(),
        config.gemini_api_key.clone(),
        config.reading_model.clone(),
    ));
    info!(model = %config.reading_model, "Reading adapter initialized");

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), reading_adapter));

    // --- 4. Create the Web Router ---
    let app = Router::new()
        .route("/draws", post(create_draw_handler))
        .route("/draws/{draw_id}/select", post(select_slot_handler))
        .route("/draws/{draw_id}/reading", post(reading_handler))
        .route("/draws/{draw_id}/reset", post(reset_draw_handler))
        .with_state(app_state);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
