use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitrine::config::AppConfig;
use vitrine::database::init_store;
use vitrine::state::AppState;
use vitrine::upload::UploadGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store = init_store(&config.database)
        .await
        .context("Failed to open document store")?;
    let uploads = UploadGateway::from_config(&config.storage)
        .await
        .context("Failed to initialize upload storage")?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    let state = AppState::new(config, store.clone(), uploads);
    let app = vitrine::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    store.close().await?;
    info!("Document store closed");
    Ok(())
}
