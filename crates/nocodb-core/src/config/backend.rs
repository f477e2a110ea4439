//! Backend (NocoDB) connection configuration.
//!
//! The backend is reached over its REST API using three settings: the instance
//! URL, an API token and the identifier of the base whose tables are exposed.
//! Each setting can be given literally in the config file or through an
//! environment variable. The environment wins when both are present.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ConfigError;

/// Backend connection settings as written in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the NocoDB instance, e.g. `https://noco.example.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Environment variable holding the base URL.
    #[serde(default = "default_url_env")]
    pub url_env: String,

    /// API token sent in the `xc-token` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Environment variable holding the API token.
    #[serde(default = "default_api_token_env")]
    pub api_token_env: String,

    /// Identifier of the base whose tables are exposed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_id: Option<String>,

    /// Environment variable holding the base identifier.
    #[serde(default = "default_base_id_env")]
    pub base_id_env: String,

    /// Timeout applied to every backend request, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            url_env: default_url_env(),
            api_token: None,
            api_token_env: default_api_token_env(),
            base_id: None,
            base_id_env: default_base_id_env(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl BackendConfig {
    /// Resolve the settings against the process environment.
    pub fn resolve(&self) -> ConnectionConfig {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve the settings using `lookup` to read environment variables.
    ///
    /// Missing values resolve to empty strings. They are reported by
    /// [`ConnectionConfig::validate`] when a backend call first needs them.
    pub fn resolve_with<F>(&self, lookup: F) -> ConnectionConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |env: &str, literal: &Option<String>| {
            lookup(env)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| literal.clone())
                .unwrap_or_default()
                .trim()
                .to_string()
        };

        ConnectionConfig {
            base_url: pick(&self.url_env, &self.url)
                .trim_end_matches('/')
                .to_string(),
            api_token: pick(&self.api_token_env, &self.api_token),
            base_id: pick(&self.base_id_env, &self.base_id),
            timeout: Duration::from_secs(self.timeout_seconds),
            url_env: self.url_env.clone(),
            api_token_env: self.api_token_env.clone(),
            base_id_env: self.base_id_env.clone(),
        }
    }
}

/// Immutable connection settings handed to the request-handling components.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Backend base URL without trailing slash.
    pub base_url: String,
    /// API token.
    pub api_token: String,
    /// Base identifier.
    pub base_id: String,
    /// Per-request timeout.
    pub timeout: Duration,
    url_env: String,
    api_token_env: String,
    base_id_env: String,
}

impl ConnectionConfig {
    /// Build a connection config directly from values.
    pub fn new(
        base_url: impl Into<String>,
        api_token: impl Into<String>,
        base_id: impl Into<String>,
    ) -> Self {
        let defaults = BackendConfig::default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            base_id: base_id.into(),
            timeout: Duration::from_secs(defaults.timeout_seconds),
            url_env: defaults.url_env,
            api_token_env: defaults.api_token_env,
            base_id_env: defaults.base_id_env,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that every required setting is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for status in self.settings() {
            if !status.is_set {
                return Err(ConfigError::Missing {
                    setting: status.setting,
                    env: status.env,
                });
            }
        }
        Ok(())
    }

    /// Report which required settings are present, in a fixed order.
    pub fn settings(&self) -> Vec<SettingStatus> {
        vec![
            SettingStatus::new("backend URL", &self.url_env, &self.base_url),
            SettingStatus::new("API token", &self.api_token_env, &self.api_token),
            SettingStatus::new("base ID", &self.base_id_env, &self.base_id),
        ]
    }
}

// The token never ends up in logs.
impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &if self.api_token.is_empty() { "" } else { "***" })
            .field("base_id", &self.base_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Presence of one required setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingStatus {
    pub setting: &'static str,
    pub env: String,
    pub is_set: bool,
}

impl SettingStatus {
    fn new(setting: &'static str, env: &str, value: &str) -> Self {
        Self {
            setting,
            env: env.to_string(),
            is_set: !value.is_empty(),
        }
    }
}

fn default_url_env() -> String {
    "NOCODB_URL".to_string()
}

fn default_api_token_env() -> String {
    "NOCODB_API_TOKEN".to_string()
}

fn default_base_id_env() -> String {
    "NOCODB_BASE_ID".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}
