//! Configuration types for the NocoDB MCP server.
//!
//! Configuration can be loaded from a YAML file and is completed by
//! environment variables for the backend connection settings.
//!
//! # Example
//!
//! ```yaml
//! backend:
//!   url: https://noco.example.com
//!   api_token_env: NOCODB_API_TOKEN
//!   base_id: p_124hhlkbeasewh
//!   timeout_seconds: 30
//! mcp:
//!   transport: http
//!   host: 0.0.0.0
//!   port: 3000
//! ```

pub mod backend;
pub mod mcp;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use backend::{BackendConfig, ConnectionConfig, SettingStatus};
pub use mcp::{McpConfig, Transport};

/// Complete configuration loaded from file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NocoConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// MCP server configuration.
    #[serde(default)]
    pub mcp: McpConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{env} environment variable is not set ({setting} is required)")]
    Missing { setting: &'static str, env: String },
}

impl NocoConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to null, which is not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
