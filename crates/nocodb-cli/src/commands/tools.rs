//! Tools introspection commands.
//!
//! `nocodb-mcp tools list` - List available tools (offline).
//! `nocodb-mcp tools describe` - Show detailed schema for a specific tool.

use anyhow::Result;
use nocodb_mcp::{Operation, ToolDefinition, all_tools};

fn badges(tool: &ToolDefinition) -> Vec<&'static str> {
    let annotations = tool.annotations.as_ref();
    let read_only = annotations.is_some_and(|a| a.read_only == Some(true));
    let destructive = annotations.is_some_and(|a| a.destructive == Some(true));

    let mut badges = vec![if read_only { "read" } else { "write" }];
    if destructive {
        badges.push("destructive");
    }
    badges
}

/// First line of a tool description.
fn summary(tool: &ToolDefinition) -> &str {
    tool.description
        .as_deref()
        .and_then(|d| d.lines().next())
        .unwrap_or("")
}

/// List all tools.
pub fn list(verbose: bool) -> Result<()> {
    let tools = all_tools();

    println!("\n🔧 Available Tools ({}):", tools.len());

    for tool in &tools {
        println!("   • {} ({})", tool.name, badges(tool).join(", "));
        println!("     {}", summary(tool));

        if verbose {
            println!(
                "     Schema: {}",
                serde_json::to_string_pretty(&tool.input_schema)?
            );
        }
    }

    println!();
    Ok(())
}

/// Describe a specific tool.
pub fn describe(name: &str) -> Result<()> {
    let Some(operation) = Operation::from_name(name) else {
        let available: Vec<&str> = Operation::ALL.iter().map(|op| op.name()).collect();
        anyhow::bail!(
            "Tool '{}' not found. Available tools: {}",
            name,
            available.join(", ")
        );
    };
    let tool = operation.definition();

    println!("\n🔧 Tool: {} ({})", tool.name, badges(&tool).join(", "));
    println!("{}", "─".repeat(60));
    if let Some(description) = &tool.description {
        println!("{}", description);
    }

    println!("\n📋 Input Schema:");
    println!("{}", serde_json::to_string_pretty(&tool.input_schema)?);
    println!();

    Ok(())
}
