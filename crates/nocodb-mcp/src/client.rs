//! Authenticated HTTP client for the NocoDB REST API.
//!
//! A [`ConnectionProvider`] hands out one [`BackendClient`] per operation. The
//! client owns its own connection pool and is released when it goes out of
//! scope, so concurrent operations never share a connection.

use crate::error::OperationError;
use nocodb_core::ConnectionConfig;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::sync::Arc;

/// Header carrying the API token.
pub const TOKEN_HEADER: &str = "xc-token";

/// Builds per-operation backend clients from the process-wide configuration.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    config: Arc<ConnectionConfig>,
}

impl ConnectionProvider {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration clients are built from.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Build a client for one operation.
    ///
    /// Fails with [`OperationError::Config`] when the backend URL, token or
    /// base identifier is missing.
    pub fn acquire(&self) -> Result<BackendClient, OperationError> {
        self.config.validate()?;

        let mut token = HeaderValue::from_str(&self.config.api_token).map_err(|e| {
            OperationError::Transport(format!("API token is not a valid header value: {}", e))
        })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(TOKEN_HEADER), token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.config.timeout)
            .build()?;

        tracing::debug!(base_url = %self.config.base_url, "Created backend client");

        Ok(BackendClient {
            http,
            base_url: self.config.base_url.clone(),
            base_id: self.config.base_id.clone(),
        })
    }
}

/// Raw successful backend response.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}

impl BackendResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value, OperationError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// HTTP client scoped to a single operation.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    base_id: String,
}

impl BackendClient {
    /// Identifier of the configured base.
    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the raw response.
    ///
    /// Non-2xx statuses become [`OperationError::Backend`] carrying the
    /// status and the response body text.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<BackendResponse, OperationError> {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, query = ?query, "Sending backend request");

        let mut builder = self.http.request(method, &url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(status = status.as_u16(), bytes = text.len(), "Backend responded");

        if !status.is_success() {
            return Err(OperationError::Backend {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(BackendResponse {
            status: status.as_u16(),
            body: text,
        })
    }

    /// GET `path` and parse the JSON body.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, OperationError> {
        self.request(Method::GET, path, query, None).await?.json()
    }

    /// Send `body` with `method` and parse the JSON response body.
    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: &Value,
    ) -> Result<Value, OperationError> {
        self.request(method, path, &[], Some(body)).await?.json()
    }
}

impl Drop for BackendClient {
    fn drop(&mut self) {
        tracing::trace!(base_url = %self.base_url, "Released backend client");
    }
}
