use anyhow::Result;
use chrono::Utc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace, warn};

use crate::config::{get_offer_sweep_interval, initialize_app_state_with_url};
use crate::router::create_router;

pub async fn serve(database_url: &str, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("KaamSet application starting up");
    debug!("Database URL: {}", database_url);
    debug!("Bind address: {}", bind_address);

    // Initialize application state
    trace!("Initializing application state");
    let state = match initialize_app_state_with_url(database_url).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Background expiry sweep so stale offers flip even when nobody opens
    // them. Responding to a stale offer expires it lazily as well, the
    // sweep just bounds the staleness.
    let sweep_interval = get_offer_sweep_interval();
    let sweep_db = state.db.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;
            match lifecycle::offer::expire_stale(&sweep_db, Utc::now().naive_utc()).await {
                Ok(0) => trace!("Offer sweep found nothing to expire"),
                Ok(count) => info!("Offer sweep expired {} offers", count),
                Err(e) => warn!("Offer sweep failed: {}", e),
            }
        }
    });
    debug!("Offer expiry sweep scheduled every {:?}", sweep_interval);

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    trace!("Attempting to bind TCP listener to {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("KaamSet API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);
    debug!("Server is ready to accept connections");

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
