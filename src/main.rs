//! Task service entry point.
//!
//! Environment variables (a `.env` file is honored):
//!
//! - `HOST` / `PORT`: listen address, default `0.0.0.0:8080`
//! - `STORAGE_MODE`: `mongo` (default) | `in_memory`
//! - `MONGODB_URI`, `MONGODB_DATABASE`, `MONGODB_COLLECTION`
//! - `MONGODB_CONNECT_TIMEOUT_SECS`, `DB_WRITE_TIMEOUT_SECS`, `DB_READ_TIMEOUT_SECS`
//! - `RUST_LOG`: log filter, default `task_service=debug,tower_http=debug`

use task_service::config::Config;
use task_service::dependencies::{self, StartupError};
use task_service::routes;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(error) = run().await {
        tracing::error!(%error, "Task service stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    tracing::info!(storage_mode = ?config.storage_mode, "Configuration loaded");

    let state = dependencies::build(&config).await?;
    let app = routes::app(state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Task routes initialized, listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
