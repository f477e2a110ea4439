//! Shared test infrastructure for NocoDB MCP end-to-end tests.
//!
//! This module provides:
//! - An in-process mock NocoDB server that records every request
//! - Scripted responses per method and path
//! - Helper functions for test assertions

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use nocodb_core::ConnectionConfig;
use nocodb_mcp::executor::{ExecutionResult, ToolExecutor};
use nocodb_mcp::translator::Translator;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

// =============================================================================
// MOCK BACKEND CONFIGURATION
// =============================================================================

pub const API_TOKEN: &str = "test-token";
pub const BASE_ID: &str = "p1";
pub const CUSTOMERS_ID: &str = "tbl_abc";
pub const ORDERS_ID: &str = "tbl_def";

/// Table listing served for the base unless a test overrides it.
pub fn default_tables() -> Value {
    json!({
        "list": [
            { "id": CUSTOMERS_ID, "title": "Customers" },
            { "id": ORDERS_ID, "title": "Orders" }
        ],
        "pageInfo": { "totalRows": 2, "page": 1, "pageSize": 25 }
    })
}

// =============================================================================
// MOCK NOCODB SERVER
// =============================================================================

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub token: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Scripted answer for one method and path.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self::text(status, body.to_string())
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
        }
    }
}

#[derive(Default)]
struct MockState {
    requests: RwLock<Vec<RecordedRequest>>,
    routes: RwLock<HashMap<(String, String), MockResponse>>,
}

type SharedState = Arc<MockState>;

async fn record(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        token: header_str("xc-token"),
        content_type: header_str(header::CONTENT_TYPE.as_str()),
        body: serde_json::from_str(&body).ok(),
    };
    state.requests.write().await.push(request);

    let key = (method.to_string(), uri.path().to_string());
    match state.routes.read().await.get(&key) {
        Some(scripted) if scripted.body.is_empty() => scripted.status.into_response(),
        Some(scripted) => (
            scripted.status,
            [(header::CONTENT_TYPE, "application/json")],
            scripted.body.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            json!({ "msg": format!("No mock for {} {}", key.0, key.1) }).to_string(),
        )
            .into_response(),
    }
}

/// In-process stand-in for a NocoDB instance.
pub struct MockNocoDb {
    addr: SocketAddr,
    state: SharedState,
}

impl MockNocoDb {
    /// Start the mock on an ephemeral port.
    pub async fn start() -> Result<Self, String> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| format!("Failed to bind mock backend: {}", e))?;
        let addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to read mock address: {}", e))?;

        let state = SharedState::default();
        let app = Router::new().fallback(record).with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Script the answer for `method` on `path`.
    pub async fn on(&self, method: &str, path: &str, response: MockResponse) {
        self.state
            .routes
            .write()
            .await
            .insert((method.to_string(), path.to_string()), response);
    }

    /// Clear recorded requests and scripted answers, then serve the default
    /// table listing.
    pub async fn reset(&self) {
        self.state.requests.write().await.clear();
        self.state.routes.write().await.clear();
        self.on(
            "GET",
            &format!("/api/v2/meta/bases/{}/tables", BASE_ID),
            MockResponse::json(200, default_tables()),
        )
        .await;
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.read().await.clone()
    }

    /// Recorded requests excluding the table listing lookups.
    pub async fn data_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| !r.path.ends_with("/tables"))
            .collect()
    }
}

// =============================================================================
// TEST CONTEXT
// =============================================================================

pub struct TestContext {
    pub backend: MockNocoDb,
}

impl TestContext {
    pub async fn setup() -> Result<Self, String> {
        let backend = MockNocoDb::start().await?;
        println!("✅ Mock NocoDB listening on {}", backend.url());
        Ok(Self { backend })
    }

    /// Connection settings pointing at the mock.
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig::new(self.backend.url(), API_TOKEN, BASE_ID)
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.connection())
    }

    pub fn executor(&self) -> ToolExecutor {
        ToolExecutor::new(self.translator())
    }

    /// Reset the mock and return a fresh translator.
    pub async fn fresh(&self) -> Translator {
        self.backend.reset().await;
        self.translator()
    }
}

// =============================================================================
// ASSERTION HELPERS
// =============================================================================

pub fn assert_success(envelope: &Value, msg: &str) {
    assert!(
        envelope.get("error").and_then(Value::as_bool) != Some(true),
        "{}: {}",
        msg,
        envelope
    );
}

pub fn assert_error(envelope: &Value, msg: &str) {
    assert_eq!(envelope["error"], true, "{}: {}", msg, envelope);
}

pub fn assert_tool_success(result: &ExecutionResult, msg: &str) {
    assert!(!result.is_error, "{}: {}", msg, result.envelope);
}

pub fn records_path(table_id: &str) -> String {
    format!("/api/v2/tables/{}/records", table_id)
}

pub fn record_path(table_id: &str, row_id: &str) -> String {
    format!("/api/v2/tables/{}/records/{}", table_id, row_id)
}

pub fn bulk_path(table_id: &str) -> String {
    format!("/api/v2/tables/{}/records/bulk", table_id)
}
