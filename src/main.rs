//! stock_summary - Inventory Summary Service
//!
//! Serves product totals (quantity, purchase, sale and profit values, split
//! into sold and in-stock) for the global listing and the seller and
//! purchase detail views, plus a stateless aggregation endpoint.

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stock_summary::api;
use stock_summary::config::Config;
use stock_summary::db;
use stock_summary::store::{InMemoryProductStore, PgProductStore, ProductStore};
use stock_summary::summary::SummaryService;

/// Initialize tracing/logging
fn init_tracing(json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stock_summary=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Select the product store from configuration
async fn open_store(config: &Config) -> anyhow::Result<ProductStore> {
    if let Some(database_url) = &config.database_url {
        tracing::info!("Connecting to database...");
        let pool = db::connect(database_url, config).await?;
        db::verify_connection(&pool).await?;

        if !db::check_schema(&pool).await? {
            tracing::error!("Database schema is not complete. Please run migrations.");
            return Err(anyhow::anyhow!("Database schema incomplete"));
        }

        tracing::info!("Database connected successfully");
        return Ok(PgProductStore::new(pool).into());
    }

    let store = match &config.products_file {
        Some(path) => InMemoryProductStore::load_json_file(path).await?,
        None if config.is_production() => {
            return Err(anyhow::anyhow!("No product source configured (set DATABASE_URL or PRODUCTS_FILE)"));
        }
        None => {
            tracing::warn!("Neither DATABASE_URL nor PRODUCTS_FILE is set; serving an empty product list");
            InMemoryProductStore::default()
        }
    };

    Ok(store.into())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.json_logs);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(environment = %config.environment, "Starting stock_summary server");

    let store = open_store(&config).await?;
    tracing::info!(backend = store.backend(), "Product store ready");

    let app = api::build_app(SummaryService::new(store.clone()));

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down...");
    if let ProductStore::Postgres(pg) = &store {
        pg.pool().close().await;
        tracing::info!("Database connections closed. Goodbye!");
    }

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
