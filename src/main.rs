//! gamecheck - UDP liveness checker for hosted game servers
//!
//! Probes game servers with a single UDP datagram and caches the outcome
//! behind a short TTL to shield upstream servers from probe storms.

use std::net::SocketAddr;

use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamecheck::api::{create_router, AppState};
use gamecheck::config::{Config, GameRegistry};
use gamecheck::tasks::spawn_cleanup_task;

/// Main entry point for the checker service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load runtime configuration from environment variables
/// 3. Load the game registry from the YAML config file (fatal on error)
/// 4. Create the probe cache and client
/// 5. Start the background TTL cleanup task
/// 6. Start the HTTP server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamecheck=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting game server checker");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, cache_ttl={}s, probe_timeout={}s, port={}",
        config.max_entries, config.cache_ttl, config.probe_timeout, config.server_port
    );

    // Game configs are startup-fatal: never serve with partial config
    let registry = match GameRegistry::load(&config.config_path) {
        Ok(registry) => registry,
        Err(err) => {
            error!(
                "Failed to load game configuration from {}: {}",
                config.config_path, err
            );
            std::process::exit(1);
        }
    };
    info!("Loaded {} game config(s)", registry.games().len());

    let state = AppState::from_config(&config, registry);

    // Start background cleanup task
    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), config.cleanup_interval);

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown; connect info feeds the landing
    // page's remote-address fallback
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(cleanup_handle))
    .await
    .unwrap();

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the cleanup task
    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
