mod migrations;
mod seed;

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::EnvFilter;

use api::{router, AppState};
use auth::AuthService;
use catalog::CatalogStore;
use sweetshop_core::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load_with_env()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;

    migrations::run(&pool).await?;

    let auth_service = AuthService::new(
        pool.clone(),
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl_seconds,
    );
    seed::ensure_admin(&auth_service).await?;

    let state = Arc::new(AppState::new(auth_service, CatalogStore::new(pool)));
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
