//! CLI command implementations for the NocoDB MCP server.

pub mod call;
pub mod check;
pub mod serve;
pub mod tools;
