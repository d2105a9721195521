//! HTTP server lifecycle.

use crate::{AppState, create_router};
use std::net::SocketAddr;
use tokentally_error::{ServerError, TallyResult};
use tracing::{info, instrument, warn};

/// Serve the usage API until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[instrument(skip(state))]
pub async fn serve(addr: SocketAddr, state: AppState) -> TallyResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::new(format!("Failed to bind {}: {}", addr, e)))?;
    info!(%addr, "Usage API listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(format!("Server stopped: {}", e)))?;

    info!("Usage API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
