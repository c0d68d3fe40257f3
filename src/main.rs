use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use glowbook::config::AppConfig;
use glowbook::db::SqliteStore;
use glowbook::handlers;
use glowbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store = Arc::new(SqliteStore::open(&config.database_url)?);
    tracing::info!(database = %config.database_url, "opened booking store");

    match &config.service_region {
        Some(region) => tracing::info!("mobile services limited to region: {region}"),
        None => tracing::info!("mobile service region check disabled"),
    }

    let state = Arc::new(AppState {
        store: store.clone(),
        users: store,
        config: config.clone(),
    });

    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
