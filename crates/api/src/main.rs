use anyhow::Context;

use stockroom_infra::{AppConfig, InventoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let store = InventoryStore::connect(&config.store)
        .await
        .with_context(|| format!("failed to open database {}", config.store.database_url))?;

    let app = stockroom_api::app::build_app(store.clone());

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        low_stock_threshold = config.store.low_stock_threshold,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.database().close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
}
