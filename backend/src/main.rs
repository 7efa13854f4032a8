use std::sync::Arc;

use anyhow::Result;
use daily_ledger_backend::backend::{
    config::{AppConfig, StorageChoice},
    create_router, initialize_backend,
    storage::{Connection, CsvConnection, DbConnection},
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    match config.storage {
        StorageChoice::Sqlite => {
            info!("Setting up database");
            match DbConnection::new(&config.database_url).await {
                Ok(db) => serve(Arc::new(db), &config).await,
                Err(e) => {
                    // Degraded mode: an unreachable database falls back to
                    // the local file store instead of refusing to start.
                    warn!(
                        "Could not open {}: {:#}. Falling back to the file store.",
                        config.database_url, e
                    );
                    serve(Arc::new(file_store(&config)?), &config).await
                }
            }
        }
        StorageChoice::File => serve(Arc::new(file_store(&config)?), &config).await,
    }
}

fn file_store(config: &AppConfig) -> Result<CsvConnection> {
    match &config.data_dir {
        Some(dir) => CsvConnection::new(dir),
        None => CsvConnection::new_default(),
    }
}

async fn serve<C: Connection>(connection: Arc<C>, config: &AppConfig) -> Result<()> {
    let app_state = initialize_backend(connection, &config.admin_password).await?;
    let app = create_router(app_state, config)?;

    let listener = TcpListener::bind(config.addr).await?;
    info!("Listening on {}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
