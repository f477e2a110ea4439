//! Tool execution engine.
//!
//! Decodes tool arguments into typed parameters, runs the matching
//! translator operation and wraps the envelope into MCP tool content.

use crate::envelope::is_error;
use crate::error::OperationError;
use crate::params::decode;
use crate::protocol::{CallToolResponse, ToolContent};
use crate::tool_catalog::Operation;
use crate::translator::Translator;
use serde_json::Value;
use std::sync::Arc;

/// Result of a tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// The envelope returned by the operation.
    pub envelope: Value,
    /// Whether the envelope is an error envelope.
    pub is_error: bool,
}

impl ExecutionResult {
    fn from_envelope(envelope: Value) -> Self {
        let is_error = is_error(&envelope);
        Self { envelope, is_error }
    }

    /// Convert into a `tools/call` result.
    ///
    /// The envelope is serialized as text content and repeated as structured
    /// content when it is a JSON object.
    pub fn into_response(self) -> CallToolResponse {
        let text = serde_json::to_string_pretty(&self.envelope)
            .unwrap_or_else(|_| self.envelope.to_string());
        let structured_content = self.envelope.is_object().then_some(self.envelope);
        CallToolResponse {
            content: vec![ToolContent::Text { text }],
            structured_content,
            is_error: Some(self.is_error),
        }
    }
}

/// Runs tools against the NocoDB backend.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    translator: Arc<Translator>,
}

impl ToolExecutor {
    pub fn new(translator: Translator) -> Self {
        Self {
            translator: Arc::new(translator),
        }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Execute a tool by name.
    ///
    /// Unknown names and undecodable arguments produce validation error
    /// envelopes without touching the backend.
    pub async fn execute(&self, name: &str, arguments: Value) -> ExecutionResult {
        let Some(operation) = Operation::from_name(name) else {
            tracing::warn!(tool = %name, "Unknown tool");
            return ExecutionResult::from_envelope(
                OperationError::validation(format!("Unknown tool: {}", name)).into_envelope(),
            );
        };

        tracing::debug!(tool = %name, "Executing tool");
        let envelope = match self.dispatch(operation, arguments).await {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(tool = %name, error = %err, "Invalid tool arguments");
                err.into_envelope()
            }
        };

        let result = ExecutionResult::from_envelope(envelope);
        tracing::debug!(tool = %name, is_error = result.is_error, "Tool finished");
        result
    }

    async fn dispatch(&self, operation: Operation, arguments: Value) -> Result<Value, OperationError> {
        let translator = &self.translator;
        let envelope = match operation {
            Operation::RetrieveRecords => translator.retrieve_records(decode(arguments)?).await,
            Operation::CreateRecords => translator.create_records(decode(arguments)?).await,
            Operation::UpdateRecords => translator.update_records(decode(arguments)?).await,
            Operation::DeleteRecords => translator.delete_records(decode(arguments)?).await,
            Operation::GetSchema => translator.get_schema(decode(arguments)?).await,
            Operation::UpdateField => translator.update_field(decode(arguments)?).await,
            Operation::ListTables => translator.list_tables(decode(arguments)?).await,
        };
        Ok(envelope)
    }
}
