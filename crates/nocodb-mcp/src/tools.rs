//! Tool registry for MCP tools.
//!
//! This module provides a simple registry for storing and retrieving
//! MCP tool definitions. The definitions themselves are in
//! the `tool_catalog` module.

use crate::protocol::ToolDefinition;

/// Registry of available MCP tools, kept in registration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: ToolDefinition) {
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// List all tools.
    pub fn list(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }
}
