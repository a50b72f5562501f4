use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zipper_core::{
    load_config, load_config_from_env, task_queue, validate_config, Config, HttpDownloader,
    HttpUrlValidator, InMemoryTaskStore, OrchestratorConfig, TaskOrchestrator, WorkerPool,
    ZipArchiver,
};
use zipper_server::{api::create_router, state::AppState};

/// Config file used when `ZIPPER_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load()?;
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!(
        "Limits: {} active tasks, {} files per task, {} workers",
        config.tasks.max_active_tasks, config.tasks.max_files_per_task, config.workers.count
    );

    for dir in [&config.storage.download_dir, &config.storage.archive_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create directory {:?}", dir))?;
    }

    // One client for downloads and reachability probes
    let client = reqwest::Client::builder()
        .timeout(config.http.timeout())
        .build()
        .context("Failed to build HTTP client")?;

    let (queue, receiver) = task_queue(config.workers.queue_capacity);
    let orchestrator = Arc::new(TaskOrchestrator::new(
        OrchestratorConfig::from(&config),
        Arc::new(InMemoryTaskStore::new()),
        Arc::new(HttpDownloader::new(
            client.clone(),
            config.storage.download_dir.clone(),
        )),
        Arc::new(ZipArchiver::new()),
        Arc::new(HttpUrlValidator::new(client)),
        queue,
    ));

    let pool = WorkerPool::start(
        Arc::clone(&orchestrator),
        receiver,
        config.workers.count,
    );

    let state = Arc::new(AppState::new(Arc::clone(&orchestrator)));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    pool.cancel();
    pool.drain().await;
    info!("Worker pool stopped");

    if config.storage.cleanup_on_shutdown {
        remove_dir(&config.storage.download_dir).await;
        remove_dir(&config.storage.archive_dir).await;
    }

    Ok(())
}

/// Load configuration from `ZIPPER_CONFIG`, or from `config.toml` when present,
/// falling back to defaults plus environment variables.
fn load() -> Result<Config> {
    match std::env::var("ZIPPER_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        Err(_) => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                info!("Loading configuration from {:?}", path);
                load_config(path)
                    .with_context(|| format!("Failed to load config from {:?}", path))
            } else {
                info!("No config file, using defaults and environment");
                load_config_from_env().context("Failed to load config from environment")
            }
        }
    }
}

async fn remove_dir(dir: &Path) {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => info!("Removed {:?}", dir),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {:?}: {}", dir, e),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
}
