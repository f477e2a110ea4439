//! Call command.
//!
//! `nocodb-mcp call <tool> --args '<json>'` - Run one tool once and print the
//! result envelope as JSON.

use anyhow::{Context, Result};
use nocodb_core::NocoConfig;
use nocodb_mcp::{Operation, ToolExecutor, Translator};
use serde_json::Value;

/// Parse the `--args` value into a JSON object.
pub fn parse_arguments(raw: &str) -> Result<Value> {
    let arguments: Value = serde_json::from_str(raw)
        .with_context(|| format!("--args is not valid JSON: {}", raw))?;
    match arguments {
        Value::Object(_) | Value::Null => Ok(arguments),
        other => anyhow::bail!("--args must be a JSON object, got {}", other),
    }
}

pub async fn run(config: &NocoConfig, tool: &str, raw_args: &str) -> Result<()> {
    if Operation::from_name(tool).is_none() {
        anyhow::bail!("Unknown tool '{}'. Run `nocodb-mcp tools list`.", tool);
    }
    let arguments = parse_arguments(raw_args)?;

    let executor = ToolExecutor::new(Translator::new(config.backend.resolve()));
    let result = executor.execute(tool, arguments).await;

    println!("{}", serde_json::to_string_pretty(&result.envelope)?);

    if result.is_error {
        anyhow::bail!("{} returned an error", tool);
    }
    Ok(())
}
