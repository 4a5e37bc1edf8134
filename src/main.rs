use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use booking_service::app;
use booking_service::config::AppConfig;
use booking_service::db;
use booking_service::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store = db::connect(&config).await?;
    let state = Arc::new(AppState { store });

    let app = app::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("booking service listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
