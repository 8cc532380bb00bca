use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use cinematch_api::api::{create_router, AppState};
use cinematch_api::catalog::CatalogStore;
use cinematch_api::config::Config;
use cinematch_api::services::providers::tmdb::TmdbProvider;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // The one fatal path: missing or corrupt artifacts halt startup.
    let store = match CatalogStore::load(
        Path::new(&config.catalog_path),
        Path::new(&config.similarity_path),
    ) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load recommendation artifacts");
            std::process::exit(1);
        }
    };

    let provider = match TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_url.clone(),
        Duration::from_secs(config.fetch_timeout_secs),
    ) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build TMDb client");
            std::process::exit(1);
        }
    };

    let state = AppState::new(store, Arc::new(provider));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %addr, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %addr, "Server running");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
