//! HomeFix Server - waitlist and contact intake
//!
//! Serves the JSON API behind the landing page forms:
//! - `POST /api/waitlist` records a waitlist signup
//! - `GET /api/waitlist/count` reports how many signups exist
//! - `POST /api/contact` records a contact form message
//!
//! Records are kept in memory and are lost when the process exits.
//!
//! # Usage
//!
//! ```bash
//! PORT=5000 cargo run --bin homefix-server
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use homefix_server::{build_router, AppState, Config, IntakePolicy, IntakeService, MemStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Setup logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .init();
    }

    info!("Starting HomeFix Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    let storage = Arc::new(MemStorage::new());
    let policy = IntakePolicy {
        require_service: config.require_service,
    };
    let state = AppState {
        intake: IntakeService::new(storage, policy),
    };
    let app = build_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_addr()))?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
