//! Table name to table id resolution.
//!
//! Operations address tables by their display title. The backend addresses
//! them by id, so every operation looks the id up in the base's table listing.
//! The lookup is not cached.

use crate::client::BackendClient;
use crate::endpoints;
use crate::error::OperationError;
use serde_json::Value;

/// Resolve `table_name` to the backend table id.
///
/// Fails with [`OperationError::NotFound`] when no table title matches
/// exactly, and with [`OperationError::Backend`] when the listing call fails.
pub async fn resolve_table_id(
    client: &BackendClient,
    table_name: &str,
) -> Result<String, OperationError> {
    tracing::info!(table = %table_name, base_id = %client.base_id(), "Looking up table id");

    let listing = client
        .get_json(&endpoints::base_tables(client.base_id()), &[])
        .await?;

    match find_table_id(&listing, table_name) {
        Some(id) => {
            tracing::info!(table = %table_name, table_id = %id, "Found table id");
            Ok(id)
        }
        None => {
            tracing::debug!(available = ?table_titles(&listing), "Table not in listing");
            Err(OperationError::NotFound {
                table: table_name.to_string(),
                base_id: client.base_id().to_string(),
            })
        }
    }
}

/// Find the id of the first table whose title equals `table_name`.
pub fn find_table_id(listing: &Value, table_name: &str) -> Option<String> {
    tables(listing)
        .find(|t| t.get("title").and_then(Value::as_str) == Some(table_name))
        .and_then(|t| t.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn table_titles(listing: &Value) -> Vec<&str> {
    tables(listing)
        .filter_map(|t| t.get("title").and_then(Value::as_str))
        .collect()
}

fn tables(listing: &Value) -> impl Iterator<Item = &Value> {
    listing
        .get("list")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}
