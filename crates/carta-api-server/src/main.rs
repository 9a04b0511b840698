use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use carta_api_server::config::Settings;
use carta_api_server::database::{DbPool, PgMenuStore};
use carta_api_server::services::MenuService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,carta_api_server=debug".to_string()),
        )
        .with_target(true)
        .json()
        .init();

    info!("Starting Carta API Server...");

    let settings = Settings::load()?;
    info!("Configuration loaded");

    let pool = DbPool::new(&settings.database).await?;
    info!("Database connection established");

    let store = Arc::new(PgMenuStore::new(pool));
    store.ensure_schema().await?;
    info!("Menu schema ensured");

    let service = Arc::new(MenuService::new(store));
    let app = carta_api_server::build_router(service);

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
