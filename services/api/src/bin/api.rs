//! services/api/src/bin/api.rs

use api_lib::{
    config::Config,
    error::ApiError,
    web::{router, AppState},
};
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

    // --- 2. Seed the In-Memory Store & Build the Shared AppState ---
    let app_state = Arc::new(AppState::in_memory(config.clone())?);
    let courses = app_state.shop.list_courses(None).await?;
    let users = app_state.shop.total_users().await?;
    info!("Store seeded with {} courses and {} users", courses.len(), users);

    // --- 3. Create the Web Router ---
    let app = router(app_state);

    // --- 4. Start the Server ---
    info!("Starting server on http://{}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
