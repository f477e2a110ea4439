// Configuration types shared across all NocoDB MCP crates
pub mod config;

pub use config::{
    BackendConfig, ConfigError, ConnectionConfig, McpConfig, NocoConfig, SettingStatus, Transport,
};
