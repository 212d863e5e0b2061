use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use next_episode::{
    api::{create_router, AppState},
    config::Config,
    services::providers::InMemoryLibrary,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("next_episode=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let library = match &config.library_path {
        Some(path) => InMemoryLibrary::load(path).await?,
        None => {
            tracing::warn!("No library snapshot configured, starting with an empty library");
            InMemoryLibrary::new()
        }
    };

    // Initialize application state
    let state = AppState::from_library(Arc::new(library), &config);

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
