use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use courier_api::{app, AppState};
use courier_core::OrderRepository;
use courier_order::{InMemoryOrderRepository, OrderManager};
use courier_quote::QuoteEngine;
use courier_store::app_config::{Config, StorageBackend};
use courier_store::{DbClient, PostgresOrderRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "courier_api=debug,courier_order=debug,courier_quote=debug,courier_store=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Courier API on port {}", config.server.port);

    let repo: Arc<dyn OrderRepository> = match config.database.backend {
        StorageBackend::Postgres => {
            let db = DbClient::new(&config.database)
                .await
                .context("Failed to connect to Postgres")?;
            Arc::new(PostgresOrderRepository::new(db))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory order storage; orders are lost on restart");
            Arc::new(InMemoryOrderRepository::new())
        }
    };

    // Schema setup is the only storage call allowed to stop the process
    tokio::time::timeout(config.database.schema_timeout(), repo.ensure_schema())
        .await
        .context("Timed out ensuring indexes")?
        .context("Failed to ensure indexes")?;

    let engine = QuoteEngine::new(config.pricing);
    let app_state = AppState::new(OrderManager::new(repo, engine));
    let app = app(app_state, config.server.request_timeout());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
