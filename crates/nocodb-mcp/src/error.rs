//! Error types for the MCP crate.

use nocodb_core::ConfigError;
use thiserror::Error;

/// Errors that can occur in the MCP server itself.
#[derive(Debug, Error)]
pub enum McpError {
    /// Failed to start the server.
    #[error("failed to start MCP server: {0}")]
    StartupFailed(String),

    /// Transport error.
    #[error("transport error: {0}")]
    TransportError(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failure of one tool operation.
///
/// Every variant is converted into an error envelope at the operation
/// boundary, see [`crate::envelope`].
#[derive(Debug, Error)]
pub enum OperationError {
    /// Required configuration is missing.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Caller supplied missing or malformed parameters.
    #[error("{0}")]
    Validation(String),

    /// The table name does not match any table in the base.
    #[error("Table '{table}' not found in base '{base_id}'")]
    NotFound { table: String, base_id: String },

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    /// Network or (de)serialization failure talking to the backend.
    #[error("{0}")]
    Transport(String),
}

impl OperationError {
    pub fn validation(message: impl Into<String>) -> Self {
        OperationError::Validation(message.into())
    }

    /// HTTP status reported by the backend, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OperationError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OperationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OperationError::Transport(format!("request timed out: {}", err))
        } else {
            OperationError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for OperationError {
    fn from(err: serde_json::Error) -> Self {
        OperationError::Transport(format!("invalid JSON from backend: {}", err))
    }
}
