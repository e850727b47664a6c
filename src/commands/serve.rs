//! Start the Warden HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::{info, warn};

use warden_api::{TracingNotifier, build_app, build_state};
use warden_auth::MemoryDirectory;
use warden_cache::StoreManager;
use warden_core::config::AppConfig;
use warden_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// JSON file of subjects to seed the in-memory directory with
    #[arg(long, default_value = "config/subjects.json")]
    pub subjects: PathBuf,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    info!("Starting Warden v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Session store ────────────────────────────────────
    info!(provider = %config.store.provider, "Initializing session store");
    let store = Arc::new(StoreManager::new(&config.store).await?);

    // ── Step 2: Subject directory ────────────────────────────────
    let directory = if args.subjects.exists() {
        MemoryDirectory::from_json_file(&args.subjects)?
    } else {
        warn!(path = %args.subjects.display(), "Subjects file not found, starting with an empty directory");
        MemoryDirectory::new()
    };

    // ── Step 3: Router ───────────────────────────────────────────
    let addr = config.server.bind_address();
    let state = build_state(
        config,
        store,
        Arc::new(directory),
        Arc::new(TracingNotifier),
    );
    let app = build_app(state);

    // ── Step 4: Serve ────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
