use crate::schemas::AppState;
use anyhow::Result;
use sea_orm::Database;
use std::time::Duration;

/// Initialize application configuration and state
pub async fn initialize_app_state() -> Result<AppState> {
    // Load configuration
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://kaamset.db".to_string());

    initialize_app_state_with_url(&database_url).await
}

/// Initialize application state against a specific database
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    Ok(AppState { db })
}

/// Get bind address from environment or use default
pub fn get_bind_address() -> String {
    std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

/// How often the background task sweeps expired offers
pub fn get_offer_sweep_interval() -> Duration {
    let seconds = std::env::var("OFFER_SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(60);
    Duration::from_secs(seconds)
}
