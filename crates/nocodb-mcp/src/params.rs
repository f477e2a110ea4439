//! Typed parameters of the NocoDB tools.
//!
//! Arguments arrive as loose JSON from the agent. Each tool decodes them into
//! one of these structs. Record identifiers are accepted as strings or
//! integers and normalised to strings; an empty identifier counts as absent.

use crate::error::OperationError;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveRecordsParams {
    #[serde(default)]
    pub table_name: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub row_id: Option<String>,
    #[serde(default)]
    pub filters: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: Option<u64>,
    #[serde(default = "default_offset")]
    pub offset: Option<u64>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub fields: Option<String>,
}

impl RetrieveRecordsParams {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            limit: default_limit(),
            offset: default_offset(),
            ..Default::default()
        }
    }

    /// Query parameters for the list endpoint, present ones only.
    pub fn list_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(sort) = non_empty(&self.sort) {
            query.push(("sort", sort.to_string()));
        }
        if let Some(fields) = non_empty(&self.fields) {
            query.push(("fields", fields.to_string()));
        }
        if let Some(filters) = non_empty(&self.filters) {
            query.push(("where", filters.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRecordsParams {
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub bulk: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecordsParams {
    #[serde(default)]
    pub table_name: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub row_id: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub bulk: bool,
    #[serde(default, deserialize_with = "optional_ids")]
    pub bulk_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteRecordsParams {
    #[serde(default)]
    pub table_name: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub row_id: Option<String>,
    #[serde(default)]
    pub bulk: bool,
    #[serde(default, deserialize_with = "optional_ids")]
    pub bulk_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetSchemaParams {
    #[serde(default)]
    pub table_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFieldParams {
    #[serde(default, deserialize_with = "optional_id")]
    pub field_id: Option<String>,
    #[serde(default)]
    pub field_data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListTablesParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub include_m2m: bool,
}

impl Default for ListTablesParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            sort: None,
            include_m2m: false,
        }
    }
}

impl ListTablesParams {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("includeM2M", self.include_m2m.to_string()),
        ];
        if let Some(sort) = non_empty(&self.sort) {
            query.push(("sort", sort.to_string()));
        }
        query
    }
}

/// Record payload of `create_records`: one mapping or a sequence of them.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordPayload {
    One(Map<String, Value>),
    Many(Vec<Value>),
}

impl RecordPayload {
    /// Interpret the raw `data` argument.
    pub fn from_value(data: Option<Value>) -> Result<Self, OperationError> {
        match data {
            Some(Value::Object(map)) if !map.is_empty() => Ok(RecordPayload::One(map)),
            Some(Value::Array(items)) if !items.is_empty() => {
                if items.iter().all(Value::is_object) {
                    Ok(RecordPayload::Many(items))
                } else {
                    Err(OperationError::validation(
                        "data must be an object or an array of objects",
                    ))
                }
            }
            None | Some(Value::Null) | Some(Value::Object(_)) | Some(Value::Array(_)) => Err(
                OperationError::validation("Data is required for record creation"),
            ),
            Some(_) => Err(OperationError::validation(
                "data must be an object or an array of objects",
            )),
        }
    }

    /// Coerce the payload to the shape the chosen endpoint expects.
    ///
    /// Bulk mode wraps a single mapping in a one-element array. Single mode
    /// keeps only the first element of a sequence.
    pub fn coerce(self, bulk: bool) -> Result<Value, OperationError> {
        match (self, bulk) {
            (RecordPayload::One(map), true) => {
                tracing::warn!("Bulk creation requested but data is not a list, wrapping single record");
                Ok(Value::Array(vec![Value::Object(map)]))
            }
            (RecordPayload::Many(items), true) => Ok(Value::Array(items)),
            (RecordPayload::One(map), false) => Ok(Value::Object(map)),
            (RecordPayload::Many(items), false) => {
                tracing::warn!(
                    discarded = items.len().saturating_sub(1),
                    "Single record creation requested but data is a list, using first item only"
                );
                match items.into_iter().next() {
                    Some(Value::Object(first)) if !first.is_empty() => Ok(Value::Object(first)),
                    _ => Err(OperationError::validation(
                        "Data dictionary cannot be empty for single record creation",
                    )),
                }
            }
        }
    }
}

/// How an update or delete addresses its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Single(String),
    Bulk(Vec<String>),
}

impl Target {
    /// Pick the addressing mode. `bulk_action` and `single_action` complete
    /// the validation messages, e.g. "updates" and "update".
    pub fn select(
        bulk: bool,
        row_id: Option<String>,
        bulk_ids: Option<Vec<String>>,
        bulk_action: &str,
        single_action: &str,
    ) -> Result<Self, OperationError> {
        if bulk {
            match bulk_ids {
                Some(ids) if !ids.is_empty() => Ok(Target::Bulk(ids)),
                _ => Err(OperationError::validation(format!(
                    "Bulk IDs are required for bulk {}",
                    bulk_action
                ))),
            }
        } else {
            row_id.map(Target::Single).ok_or_else(|| {
                OperationError::validation(format!(
                    "Row ID is required for single record {}",
                    single_action
                ))
            })
        }
    }
}

/// A record or field identifier as sent by the agent.
#[derive(Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Number(serde_json::Number),
}

impl Identifier {
    fn into_string(self) -> String {
        match self {
            Identifier::Text(s) => s.trim().to_string(),
            Identifier::Number(n) => n.to_string(),
        }
    }
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Identifier>::deserialize(deserializer)?
        .map(Identifier::into_string)
        .filter(|id| !id.is_empty()))
}

fn optional_ids<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Identifier>>::deserialize(deserializer)?
        .map(|ids| {
            ids.into_iter()
                .map(Identifier::into_string)
                .filter(|id| !id.is_empty())
                .collect()
        }))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Decode tool arguments, treating a missing argument object as empty.
pub fn decode<T>(arguments: Value) -> Result<T, OperationError>
where
    T: for<'de> Deserialize<'de>,
{
    let arguments = if arguments.is_null() {
        Value::Object(Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments)
        .map_err(|e| OperationError::validation(format!("Invalid arguments: {}", e)))
}

fn default_limit() -> Option<u64> {
    Some(10)
}

fn default_offset() -> Option<u64> {
    Some(0)
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    25
}
