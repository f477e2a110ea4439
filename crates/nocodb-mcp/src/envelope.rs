//! The result envelope returned by every operation.
//!
//! On success the envelope is the backend's JSON body, passed through. On
//! failure it is `{"error": true, "message": ..., "status_code"?: ...}`.
//! Delete responses come in several shapes and are normalised through
//! [`DeleteResponse`].

use crate::error::OperationError;
use serde::Serialize;
use serde_json::{Map, Number, Value, json};

/// Message used for every delete that does not report a count.
pub const DELETED_MESSAGE: &str = "Record(s) deleted successfully";

/// Normalised error shape.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorEnvelope {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl From<&OperationError> for ErrorEnvelope {
    fn from(err: &OperationError) -> Self {
        let message = match err {
            OperationError::Backend { body, .. } => format!("HTTP error: {}", body),
            OperationError::Validation(message) => message.clone(),
            other => format!("Error: {}", other),
        };
        Self {
            error: true,
            message,
            status_code: err.status_code(),
        }
    }
}

impl OperationError {
    /// Convert into the error envelope value.
    pub fn into_envelope(self) -> Value {
        json!(ErrorEnvelope::from(&self))
    }
}

/// Whether `value` is an error envelope.
pub fn is_error(value: &Value) -> bool {
    value.get("error").and_then(Value::as_bool) == Some(true)
}

/// Shapes the delete endpoints are observed to answer with.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteResponse {
    /// 204, or an empty body.
    Empty,
    /// A bare number, the count of deleted records.
    Count(Number),
    /// A JSON object, passed through.
    Object(Map<String, Value>),
    /// Any other JSON value.
    Json(Value),
    /// A body that is not JSON at all.
    Unparsable(String),
}

impl DeleteResponse {
    /// Classify a successful delete response.
    pub fn classify(status: u16, body: &str) -> Self {
        if status == 204 || body.trim().is_empty() {
            return DeleteResponse::Empty;
        }
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Number(n)) => DeleteResponse::Count(n),
            Ok(Value::Object(map)) => DeleteResponse::Object(map),
            Ok(other) => DeleteResponse::Json(other),
            Err(_) => DeleteResponse::Unparsable(body.to_string()),
        }
    }

    /// Map to the success envelope.
    pub fn into_envelope(self) -> Value {
        match self {
            DeleteResponse::Empty | DeleteResponse::Unparsable(_) => {
                json!({ "success": true, "message": DELETED_MESSAGE })
            }
            DeleteResponse::Count(n) => json!({
                "success": true,
                "message": format!("{} record(s) deleted successfully", n)
            }),
            DeleteResponse::Object(map) => Value::Object(map),
            DeleteResponse::Json(data) => json!({
                "success": true,
                "message": DELETED_MESSAGE,
                "response_data": data
            }),
        }
    }
}
