mod config;
mod errors;
mod export;
mod forms;
mod layout;
mod models;
mod persistence;
mod render;
mod routes;
mod state;
mod store;
mod wizard;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageBackend};
use crate::export::Exporter;
use crate::persistence::{FileStorage, KeyValueStorage, MemoryStorage, RedisStorage};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::ResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder API v{}", env!("CARGO_PKG_VERSION"));

    let storage = open_storage(&config).await?;
    let store = ResumeStore::open(storage).await;
    info!("Resume store ready (profile: {})", config.profile);

    let exporter = Exporter::new(&config.export_dir);
    info!("Exports will be written to {}", exporter.output_dir().display());

    let state = AppState {
        store: Arc::new(store),
        exporter: Arc::new(exporter),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Selects the durable key-value backend for the configured profile.
async fn open_storage(config: &Config) -> Result<Arc<dyn KeyValueStorage>> {
    let storage: Arc<dyn KeyValueStorage> = match config.storage_backend {
        StorageBackend::File => {
            let storage = FileStorage::new(&config.storage_dir, &config.profile);
            info!("File storage at {}", storage.dir().display());
            Arc::new(storage)
        }
        StorageBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis backend")?;
            let storage = RedisStorage::connect(url, &config.profile)
                .await
                .context("Failed to connect to Redis")?;
            info!("Redis storage initialized");
            Arc::new(storage)
        }
        StorageBackend::Memory => {
            info!("In-memory storage; the resume will not survive a restart");
            Arc::new(MemoryStorage::new())
        }
    };
    Ok(storage)
}
