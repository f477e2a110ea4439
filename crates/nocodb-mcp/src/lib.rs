//! # nocodb-mcp
//!
//! MCP (Model Context Protocol) server exposing a NocoDB base as tools.
//!
//! Each tool call is translated into authenticated calls against the NocoDB
//! REST API and the answer is returned as a uniform result envelope:
//!
//! ```text
//! AI Agent
//!       │
//!       │ MCP protocol (list tools / call tool)
//!       ▼
//! ┌──────────────────────┐
//! │  NocoDB MCP Server   │
//! │  1. Decode arguments │  ← params
//! │  2. Validate         │
//! │  3. Resolve table    │  ← resolver
//! │  4. Call REST API    │  ← client, endpoints
//! │  5. Normalise result │  ← envelope
//! └──────────┬───────────┘
//!            │ xc-token
//!            ▼
//!         NocoDB
//! ```
//!
//! Operations never fail at the protocol level: backend errors come back as
//! `{"error": true, "status_code": ..., "message": "HTTP error: ..."}` and any
//! other failure as `{"error": true, "message": "Error: ..."}`.
//!
//! ## Example Usage
//!
//! ```ignore
//! use nocodb_core::NocoConfig;
//! use nocodb_mcp::{McpServer, Translator};
//!
//! let config = NocoConfig::load(None)?;
//! let server = McpServer::new(config.mcp)
//!     .with_translator(Translator::new(config.backend.resolve()));
//!
//! server.run().await?;
//! ```

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod http_transport;
pub mod params;
pub mod protocol;
pub mod resolver;
pub mod server;
pub mod tool_catalog;
pub mod tools;
pub mod translator;

pub use client::{BackendClient, BackendResponse, ConnectionProvider};
pub use envelope::{DeleteResponse, ErrorEnvelope};
pub use error::{McpError, OperationError};
pub use executor::{ExecutionResult, ToolExecutor};
pub use protocol::{
    CallToolParams, CallToolResponse, JsonRpcRequest, JsonRpcResponse, ToolAnnotations,
    ToolContent, ToolDefinition,
};
pub use server::McpServer;
pub use tool_catalog::{Operation, all_tools};
pub use tools::ToolRegistry;
pub use translator::Translator;
