//! MCP server implementation.
//!
//! This module provides the main MCP server that handles tool discovery
//! and execution over stdio or HTTP.

use crate::error::McpError;
use crate::executor::ToolExecutor;
use crate::http_transport::{HttpServer, PendingRequest};
use crate::protocol::*;
use crate::tool_catalog::all_tools;
use crate::tools::ToolRegistry;
use crate::translator::Translator;
use nocodb_core::{McpConfig, Transport};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

/// Name reported in `initialize` and `/health`.
pub const SERVER_NAME: &str = "nocodb-mcp";

/// The MCP server.
#[derive(Clone)]
pub struct McpServer {
    config: McpConfig,
    tools: ToolRegistry,
    executor: Option<ToolExecutor>,
}

impl McpServer {
    /// Create a new MCP server exposing the NocoDB tool catalog.
    pub fn new(config: McpConfig) -> Self {
        let mut tools = ToolRegistry::new();
        for tool in all_tools() {
            tools.register(tool);
        }
        Self {
            config,
            tools,
            executor: None,
        }
    }

    /// Set the executor that runs tool calls.
    pub fn with_executor(mut self, executor: ToolExecutor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Run tool calls through the given translator.
    pub fn with_translator(self, translator: Translator) -> Self {
        self.with_executor(ToolExecutor::new(translator))
    }

    pub fn config(&self) -> &McpConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Start the MCP server on the configured transport.
    pub async fn run(&self) -> Result<(), McpError> {
        tracing::info!(
            transport = ?self.config.transport,
            tool_count = self.tools.len(),
            "Starting MCP server"
        );
        match self.config.transport {
            Transport::Stdio => self.run_stdio().await,
            Transport::Http => self.run_http().await,
        }
    }

    /// Run the server with stdio transport.
    async fn run_stdio(&self) -> Result<(), McpError> {
        tracing::info!("Starting MCP server with stdio transport");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match parse_message(line) {
                Ok(request) => self.handle_request(request).await,
                Err(error) => Some(error),
            };

            if let Some(response) = response {
                let mut response_json = serde_json::to_string(&response)?;
                response_json.push('\n');
                stdout.write_all(response_json.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("stdin closed, stopping MCP server");
        Ok(())
    }

    /// Run the server with HTTP transport.
    pub async fn run_http(&self) -> Result<(), McpError> {
        let addr = self.config.bind_addr();
        tracing::info!(addr = %addr, "Starting MCP server with HTTP transport");

        let (request_tx, mut request_rx) = mpsc::channel::<PendingRequest>(100);

        // One task per request so slow backend calls never block each other.
        let server = Arc::new(self.clone());
        tokio::spawn(async move {
            while let Some((request, response_tx)) = request_rx.recv().await {
                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    let response = server.handle_request(request).await;
                    let _ = response_tx.send(response);
                });
            }
        });

        HttpServer::new(addr, request_tx).run().await
    }

    /// Handle a JSON-RPC request. Notifications produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id.clone();
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, request.params).await,
            "shutdown" => self.handle_shutdown(id),
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let info = ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
        let result = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": info,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            }
        });
        JsonRpcResponse::success(id, result)
    }

    fn handle_list_tools(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ListToolsResponse {
            tools: self.tools.list().to_vec(),
        };
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        format!("Invalid params: {}", e),
                    );
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        if !self.tools.contains(&params.name) {
            return JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                format!("Tool not found: {}", params.name),
            );
        }

        let Some(executor) = &self.executor else {
            tracing::error!(tool = %params.name, "No executor configured");
            return JsonRpcResponse::error(id, INTERNAL_ERROR, "No tool executor configured");
        };

        let result = executor.execute(&params.name, params.arguments).await;
        match serde_json::to_value(result.into_response()) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }

    fn handle_shutdown(&self, id: Option<Value>) -> JsonRpcResponse {
        tracing::info!("MCP server shutdown requested");
        JsonRpcResponse::success(id, json!(null))
    }
}

/// Parse one raw JSON-RPC message.
///
/// Returns the error response to send when the text is not JSON (`-32700`)
/// or not a request object (`-32600`).
pub fn parse_message(raw: &str) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse JSON-RPC message");
        JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e))
    })?;

    let id = value.get("id").cloned();
    serde_json::from_value(value).map_err(|e| {
        JsonRpcResponse::error(id, INVALID_REQUEST, format!("Invalid request: {}", e))
    })
}
