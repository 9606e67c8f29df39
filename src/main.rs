mod api_doc;
mod config;
mod error;
mod handlers;
mod models;
mod mongo;
mod routes;
mod state;
mod store;

use anyhow::Context;
use config::Config;
use mongo::MongoStore;
use state::AppState;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("studio-booking starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = match MongoStore::connect(&config.mongo_uri, mongo::DATABASE_NAME).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("MongoDB connection error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = store.verify_connection().await {
        tracing::error!("MongoDB connection error: {:#}", e);
        std::process::exit(1);
    }

    let app = routes::router(AppState::new(store));

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind to port {}", config.port))?;
    tracing::info!("Server running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
