use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use douala_stays::config::AppConfig;
use douala_stays::handlers;
use douala_stays::services::catalog;
use douala_stays::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;

    let listings = match config.catalog_path.as_deref() {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read catalog {path}"))?;
            tracing::info!(path, "loading catalog from file");
            catalog::load_catalog(&json)?
        }
        None => {
            tracing::info!("using built-in catalog");
            catalog::builtin_catalog()?
        }
    };
    anyhow::ensure!(!listings.is_empty(), "catalog contains no valid listings");
    tracing::info!(listings = listings.len(), business = %config.business_name, "catalog ready");

    let state = Arc::new(AppState::new(config.clone(), listings));

    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
