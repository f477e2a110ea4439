use clap::{Parser, Subcommand};
use nocodb_core::NocoConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::serve::ServeArgs;

#[derive(Parser, Debug)]
#[command(
    name = "nocodb-mcp",
    version,
    about = "MCP server exposing NocoDB tables to AI agents"
)]
struct Cli {
    /// Configuration file (YAML). Backend settings can also come from
    /// NOCODB_URL, NOCODB_API_TOKEN and NOCODB_BASE_ID.
    #[arg(long, short, global = true, env = "NOCODB_MCP_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set, e.g. "debug" or "nocodb_mcp=trace".
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the MCP server.
    Serve(ServeArgs),

    /// Report which backend settings are present.
    Check {
        /// Also list the base's tables to verify the credentials.
        #[arg(long, default_value_t = false)]
        ping: bool,
    },

    /// Inspect the tool catalog (offline).
    Tools {
        #[command(subcommand)]
        cmd: ToolsCommand,
    },

    /// Invoke one tool once and print its result envelope.
    Call {
        /// Tool name, e.g. retrieve_records.
        tool: String,

        /// Tool arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

#[derive(Subcommand, Debug)]
enum ToolsCommand {
    /// List available tools.
    List {
        /// Show input schemas.
        #[arg(long, default_value_t = false)]
        verbose: bool,
    },

    /// Show the description and input schema of one tool.
    Describe { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the stdio transport.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Serve(args) => {
            let config = load_config(cli.config.as_ref())?;
            commands::serve::execute(config, args).await?
        }
        Command::Check { ping } => {
            let config = load_config(cli.config.as_ref())?;
            commands::check::run(&config, ping).await?
        }
        Command::Tools { cmd } => match cmd {
            ToolsCommand::List { verbose } => commands::tools::list(verbose)?,
            ToolsCommand::Describe { name } => commands::tools::describe(&name)?,
        },
        Command::Call { tool, args } => {
            let config = load_config(cli.config.as_ref())?;
            commands::call::run(&config, &tool, &args).await?
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<NocoConfig> {
    use anyhow::Context;

    let config = NocoConfig::load(path.map(PathBuf::as_path)).with_context(|| match path {
        Some(p) => format!("Failed to load configuration from {:?}", p),
        None => "Failed to load default configuration".to_string(),
    })?;
    Ok(config)
}
