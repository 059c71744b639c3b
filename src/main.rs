use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use travel_discounts::{
    api::{self, State},
    config::{AppConfig, database},
    core::seed,
    errors::Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file before anything reads the environment
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 2. Load the application configuration
    let app_config = AppConfig::load()?;

    // 3. Initialize tracing; RUST_LOG wins over LOG_LEVEL
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.settings.log_level)),
        )
        .init();
    info!(
        "Starting travel-discounts in '{}' mode",
        app_config.settings.environment
    );

    // 4. Initialize database and tables
    let db = database::create_connection(&app_config.settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed catalog hotels and discount codes
    seed::seed_catalog(&db, &app_config.catalog)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;

    // 6. Serve
    let bind_address = app_config.settings.bind_address();
    let state = Arc::new(State::new(db, Arc::new(app_config)));
    let router = api::construct_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", bind_address, e))?;
    info!("API listening on http://{}", bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Application shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
