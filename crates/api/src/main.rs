use std::net::SocketAddr;
use std::sync::Arc;

use cinema_api::config::{ServerConfig, StoreBackend};
use cinema_api::router::build_app_router;
use cinema_api::service::MovieService;
use cinema_api::state::AppState;
use cinema_db::{DbPool, MemoryMovieStore, MovieStore, PgMovieStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_api=debug,cinema_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = ?config.store_backend,
        "Loaded server configuration"
    );

    // --- Record store ---
    let store = connect_store(&config).await;

    // --- App state ---
    let state = AppState {
        movies: MovieService::new(store),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

async fn connect_store(config: &ServerConfig) -> Arc<dyn MovieStore> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory record store");
            Arc::new(MemoryMovieStore::new())
        }
        StoreBackend::Postgres => {
            let store = PgMovieStore::new(connect_postgres(&config.database_url).await);
            // Migrations are retried on first use if this attempt fails.
            if let Err(e) = store.ensure_schema().await {
                tracing::error!(error = %e, "Failed to run database migrations");
            }
            Arc::new(store)
        }
    }
}

/// Connect to PostgreSQL.
///
/// An unreachable database is logged, not fatal: the server starts on a lazy
/// pool and store failures surface on the first request (and in `/health`).
async fn connect_postgres(database_url: &str) -> DbPool {
    match cinema_db::create_pool(database_url).await {
        Ok(pool) => {
            tracing::info!("Database connection pool created");
            pool
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                "Database connection failed, requests will fail until it is reachable"
            );
            match cinema_db::create_lazy_pool(database_url) {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!(error = %e, "DATABASE_URL is not a valid connection string");
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
