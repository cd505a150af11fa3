//! # Fiche Produit API server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Startup Sequence                               │
//! │                                                                         │
//! │  tracing init ──► ApiConfig::load ──► store (memory | SQLite)          │
//! │       ──► ProductSheetPipeline::from_config ──► axum::serve            │
//! │                                                                         │
//! │  Ctrl+C / SIGTERM ──► graceful shutdown ──► close SQLite pool          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use fiche_api::config::ApiConfig;
use fiche_api::{router, AppState};
use fiche_pipeline::ProductSheetPipeline;
use fiche_store::{InMemoryStore, RecordStore, SqliteStore, StoreConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Fiche Produit API server...");

    // Load configuration
    let config = ApiConfig::load().context("failed to load configuration")?;
    info!(
        port = config.port,
        database = ?config.database_path,
        "Configuration loaded"
    );

    // Open the record store
    let sqlite = match config.database_path {
        Some(ref path) => Some(
            SqliteStore::connect(StoreConfig::new(path))
                .await
                .context("failed to open record store")?,
        ),
        None => None,
    };
    let store: Arc<dyn RecordStore> = match sqlite.clone() {
        Some(store) => Arc::new(store),
        None => {
            warn!("FICHE_DATABASE_PATH not set, records are kept in memory only");
            Arc::new(InMemoryStore::new())
        }
    };

    // Assemble the pipeline
    let pipeline = ProductSheetPipeline::from_config(&config.pipeline, store)
        .context("failed to assemble pipeline")?;
    let state = Arc::new(AppState::new(pipeline));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(store) = sqlite {
        store.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
