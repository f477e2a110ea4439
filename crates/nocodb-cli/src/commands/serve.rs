//! Serve command for starting the MCP server.
//!
//! `nocodb-mcp serve` - Start the MCP server on stdio or HTTP.

use anyhow::{Context, Result};
use clap::Args;
use nocodb_core::{McpConfig, NocoConfig, Transport};
use nocodb_mcp::{McpServer, Translator};
use tracing::{info, warn};

/// Arguments for `nocodb-mcp serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Transport type (stdio or http). Overrides config file.
    #[arg(long)]
    pub transport: Option<Transport>,

    /// HTTP host (only for http transport). Overrides config file.
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP port (only for http transport). Overrides config file.
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Apply command line overrides to the configured MCP settings.
    pub fn apply(&self, mut mcp: McpConfig) -> McpConfig {
        if let Some(transport) = self.transport {
            mcp.transport = transport;
        }
        if let Some(host) = &self.host {
            mcp.host = host.clone();
        }
        if let Some(port) = self.port {
            mcp.port = port;
        }
        mcp
    }
}

pub async fn execute(config: NocoConfig, args: ServeArgs) -> Result<()> {
    let mcp = args.apply(config.mcp);
    let connection = config.backend.resolve();

    info!(
        base_url = %connection.base_url,
        base_id = %connection.base_id,
        timeout_secs = connection.timeout.as_secs(),
        "Starting NocoDB MCP server"
    );
    // Missing settings are reported by every tool call; the server still starts.
    for status in connection.settings() {
        if status.is_set {
            info!(setting = status.setting, env = %status.env, "SET");
        } else {
            warn!(setting = status.setting, env = %status.env, "MISSING");
        }
    }

    let server = McpServer::new(mcp).with_translator(Translator::new(connection));
    info!(
        transport = ?server.config().transport,
        tools = ?server.tools().names(),
        "Registered tools"
    );
    if server.config().transport == Transport::Http {
        info!(addr = %server.config().bind_addr(), "Serving MCP over HTTP");
    }

    server.run().await.context("MCP server failed")?;
    Ok(())
}
