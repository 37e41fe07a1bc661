use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use autolog_server::{app, config::AppConfig, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and APP_SECRET_KEY.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;

    let pool = database::pool::connect(&config.database)
        .await
        .context("connecting to the database")?;

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config),
    };

    let port = state.config.server.port;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    tracing::info!(port, "starting server");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server")?;

    tracing::info!("server stopped");

    pool.close().await;
    tracing::info!("the database connection is closed");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM; in-flight requests drain before the
/// listener closes.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}
