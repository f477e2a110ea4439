//! HTTP transport for MCP server.
//!
//! JSON-RPC messages are POSTed to `/mcp` and forwarded to the server over a
//! channel; `/health` reports liveness.

use crate::error::McpError;
use crate::protocol::{INTERNAL_ERROR, JsonRpcRequest, JsonRpcResponse};
use crate::server::{SERVER_NAME, parse_message};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tower_http::trace::TraceLayer;

/// A request waiting for the server, with the channel its response goes to.
pub type PendingRequest = (JsonRpcRequest, oneshot::Sender<Option<JsonRpcResponse>>);

/// HTTP transport handler state.
pub struct HttpTransportState {
    /// Channel for sending requests to the MCP server.
    request_tx: mpsc::Sender<PendingRequest>,
}

impl HttpTransportState {
    pub fn new(request_tx: mpsc::Sender<PendingRequest>) -> Self {
        Self { request_tx }
    }
}

/// Create the HTTP router for MCP.
pub fn create_router(state: Arc<HttpTransportState>) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp_post))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle POST requests to /mcp (JSON-RPC over HTTP).
async fn handle_mcp_post(State(state): State<Arc<HttpTransportState>>, body: String) -> Response {
    let request = match parse_message(&body) {
        Ok(request) => request,
        Err(error) => return (StatusCode::BAD_REQUEST, Json(error)).into_response(),
    };

    let (response_tx, response_rx) = oneshot::channel();
    if state.request_tx.send((request, response_tx)).await.is_err() {
        return unavailable("MCP server unavailable");
    }

    match response_rx.await {
        Ok(Some(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(None) => StatusCode::ACCEPTED.into_response(),
        Err(_) => unavailable("No response from MCP server"),
    }
}

fn unavailable(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(JsonRpcResponse::error(None, INTERNAL_ERROR, message)),
    )
        .into_response()
}

/// Handle health check requests.
async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// HTTP server for MCP transport.
pub struct HttpServer {
    addr: String,
    state: Arc<HttpTransportState>,
}

impl HttpServer {
    pub fn new(addr: impl Into<String>, request_tx: mpsc::Sender<PendingRequest>) -> Self {
        Self {
            addr: addr.into(),
            state: Arc::new(HttpTransportState::new(request_tx)),
        }
    }

    /// Run the HTTP server until Ctrl-C.
    pub async fn run(self) -> Result<(), McpError> {
        let app = create_router(self.state);

        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| {
                McpError::StartupFailed(format!("Failed to bind to {}: {}", self.addr, e))
            })?;

        tracing::info!(addr = %self.addr, "MCP HTTP server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| McpError::TransportError(e.to_string()))?;

        tracing::info!("MCP HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
