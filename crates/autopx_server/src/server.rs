//! Serving the HTTP API.

use crate::{AppState, create_router};
use autopx_error::{AutopxResult, HttpError};
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Bind `address` and serve the API until the process exits.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server stops unexpectedly.
#[instrument(skip(state))]
pub async fn serve(state: AppState, address: &str) -> AutopxResult<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| HttpError::new(format!("Failed to bind {}: {}", address, e)))?;
    serve_on(state, listener).await
}

/// Serve the API on an already-bound listener.
///
/// # Errors
///
/// Returns an error if the server stops unexpectedly.
pub async fn serve_on(state: AppState, listener: TcpListener) -> AutopxResult<()> {
    if let Ok(local) = listener.local_addr() {
        info!(address = %local, "autopx studio listening");
    }
    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;
    Ok(())
}
