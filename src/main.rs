use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use contact_api::config;
use contact_api::database::{DatabaseManager, MemoryStore, PgStore, Store};
use contact_api::{app, AppState};

#[derive(Parser)]
#[command(name = "contact-api")]
#[command(about = "Address book API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Bind host (overrides SERVER_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Bind port (overrides SERVER_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Use the in-memory store even when DATABASE_URL is set")]
    in_memory: bool,

    #[arg(long, help = "Do not run embedded migrations on startup")]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let mut config = config::config().clone();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.skip_migrations {
        config.database.run_migrations = false;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting contact-api in {:?} mode", config.environment);

    let pool = match (&config.database.url, args.in_memory) {
        (Some(_), false) => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            if config.database.run_migrations {
                DatabaseManager::migrate(&pool)
                    .await
                    .context("failed to run migrations")?;
            }
            Some(pool)
        }
        _ => None,
    };

    let store: Arc<dyn Store> = match &pool {
        Some(pool) => Arc::new(PgStore::new(pool.clone())),
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let bind_addr = config.bind_address();
    let router = app(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(pool) = pool {
        DatabaseManager::close(&pool).await;
    }
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
