//! Operation translator.
//!
//! Maps the abstract table operations onto NocoDB REST calls. Each operation:
//!
//! 1. validates its parameters (no network traffic on failure),
//! 2. acquires its own backend client,
//! 3. resolves the table name to an id (except `update_field`),
//! 4. issues the call and normalises the response.
//!
//! Operations never fail: every error becomes an error envelope, see
//! [`crate::envelope`]. The backend client is dropped before returning.

use crate::client::ConnectionProvider;
use crate::endpoints;
use crate::envelope::DeleteResponse;
use crate::error::OperationError;
use crate::params::{
    CreateRecordsParams, DeleteRecordsParams, GetSchemaParams, ListTablesParams, RecordPayload,
    RetrieveRecordsParams, Target, UpdateFieldParams, UpdateRecordsParams,
};
use crate::resolver::resolve_table_id;
use nocodb_core::ConnectionConfig;
use reqwest::Method;
use serde_json::{Value, json};

/// Translates tool operations into backend requests.
#[derive(Debug, Clone)]
pub struct Translator {
    provider: ConnectionProvider,
}

impl Translator {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            provider: ConnectionProvider::new(config),
        }
    }

    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }

    /// Retrieve one record by id, or a page of records.
    pub async fn retrieve_records(&self, params: RetrieveRecordsParams) -> Value {
        let table = params.table_name.clone();
        tracing::info!(table = %table, "Retrieve records request");
        finish("retrieve records", &table, self.try_retrieve_records(params).await)
    }

    async fn try_retrieve_records(
        &self,
        params: RetrieveRecordsParams,
    ) -> Result<Value, OperationError> {
        require_table_name(&params.table_name)?;
        tracing::debug!(params = ?params, "Query parameters");

        let client = self.provider.acquire()?;
        let table_id = resolve_table_id(&client, &params.table_name).await?;

        if let Some(row_id) = &params.row_id {
            tracing::info!(row_id = %row_id, "Retrieving single record");
            let result = client
                .get_json(&endpoints::record(&table_id, row_id), &[])
                .await?;
            tracing::info!(table = %params.table_name, "Retrieved record");
            return Ok(result);
        }

        let query = params.list_query();
        tracing::info!(query = ?query, "Retrieving records");
        let result = client.get_json(&endpoints::records(&table_id), &query).await?;

        let count = result
            .get("list")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        tracing::info!(table = %params.table_name, count, "Retrieved records");
        if let Some(page_info) = result.get("pageInfo") {
            tracing::debug!(page_info = %page_info, "Page info");
        }

        Ok(result)
    }

    /// Create one record, or several in bulk.
    pub async fn create_records(&self, params: CreateRecordsParams) -> Value {
        let table = params.table_name.clone();
        tracing::info!(table = %table, bulk = params.bulk, "Create records request");
        finish("create records", &table, self.try_create_records(params).await)
    }

    async fn try_create_records(
        &self,
        params: CreateRecordsParams,
    ) -> Result<Value, OperationError> {
        require_table_name(&params.table_name)?;
        let payload = RecordPayload::from_value(params.data)?.coerce(params.bulk)?;

        let client = self.provider.acquire()?;
        let table_id = resolve_table_id(&client, &params.table_name).await?;

        let path = if params.bulk {
            endpoints::records_bulk(&table_id)
        } else {
            endpoints::records(&table_id)
        };
        let count = payload.as_array().map(Vec::len).unwrap_or(1);
        tracing::info!(count, bulk = params.bulk, path = %path, "Creating records");

        let result = client.send_json(Method::POST, &path, &payload).await?;
        tracing::info!(table = %params.table_name, "Created record(s)");
        Ok(result)
    }

    /// Update one record, or apply the same change to several records.
    pub async fn update_records(&self, params: UpdateRecordsParams) -> Value {
        let table = params.table_name.clone();
        tracing::info!(table = %table, bulk = params.bulk, "Update records request");
        finish("update records", &table, self.try_update_records(params).await)
    }

    async fn try_update_records(
        &self,
        params: UpdateRecordsParams,
    ) -> Result<Value, OperationError> {
        require_table_name(&params.table_name)?;
        let data = match params.data {
            Some(Value::Object(map)) if !map.is_empty() => Value::Object(map),
            Some(Value::Object(_)) | Some(Value::Null) | None => {
                return Err(OperationError::validation(
                    "Data parameter is required for updates",
                ));
            }
            Some(_) => {
                return Err(OperationError::validation(
                    "data must be an object mapping column names to values",
                ));
            }
        };
        let target = Target::select(
            params.bulk,
            params.row_id,
            params.bulk_ids,
            "updates",
            "update",
        )?;

        let client = self.provider.acquire()?;
        let table_id = resolve_table_id(&client, &params.table_name).await?;

        let result = match target {
            Target::Bulk(ids) => {
                tracing::info!(count = ids.len(), "Performing bulk update");
                let body = json!({ "ids": ids, "data": data });
                client
                    .send_json(Method::PATCH, &endpoints::records_bulk(&table_id), &body)
                    .await?
            }
            Target::Single(row_id) => {
                tracing::info!(row_id = %row_id, "Updating record");
                client
                    .send_json(Method::PATCH, &endpoints::record(&table_id, &row_id), &data)
                    .await?
            }
        };

        tracing::info!(table = %params.table_name, "Updated record(s)");
        Ok(result)
    }

    /// Delete one record, or several in bulk.
    pub async fn delete_records(&self, params: DeleteRecordsParams) -> Value {
        let table = params.table_name.clone();
        tracing::info!(table = %table, bulk = params.bulk, "Delete records request");
        finish("delete records", &table, self.try_delete_records(params).await)
    }

    async fn try_delete_records(
        &self,
        params: DeleteRecordsParams,
    ) -> Result<Value, OperationError> {
        require_table_name(&params.table_name)?;
        let target = Target::select(
            params.bulk,
            params.row_id,
            params.bulk_ids,
            "deletion",
            "deletion",
        )?;

        let client = self.provider.acquire()?;
        let table_id = resolve_table_id(&client, &params.table_name).await?;

        let response = match target {
            Target::Bulk(ids) => {
                tracing::info!(count = ids.len(), "Performing bulk deletion");
                let body = json!({ "ids": ids });
                client
                    .request(
                        Method::DELETE,
                        &endpoints::records_bulk(&table_id),
                        &[],
                        Some(&body),
                    )
                    .await?
            }
            Target::Single(row_id) => {
                tracing::info!(row_id = %row_id, "Deleting record");
                client
                    .request(Method::DELETE, &endpoints::record(&table_id, &row_id), &[], None)
                    .await?
            }
        };

        let classified = DeleteResponse::classify(response.status, &response.body);
        if let DeleteResponse::Unparsable(_) = classified {
            tracing::warn!("Delete operation returned non-empty, non-JSON response body");
        }

        tracing::info!(table = %params.table_name, "Deleted record(s)");
        Ok(classified.into_envelope())
    }

    /// Fetch the full table metadata, including column definitions.
    pub async fn get_schema(&self, params: GetSchemaParams) -> Value {
        let table = params.table_name.clone();
        tracing::info!(table = %table, "Get schema request");
        finish("get schema", &table, self.try_get_schema(params).await)
    }

    async fn try_get_schema(&self, params: GetSchemaParams) -> Result<Value, OperationError> {
        require_table_name(&params.table_name)?;

        let client = self.provider.acquire()?;
        let table_id = resolve_table_id(&client, &params.table_name).await?;

        let result = client.get_json(&endpoints::table_meta(&table_id), &[]).await?;
        let columns = result
            .get("columns")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        tracing::info!(table = %params.table_name, columns, "Retrieved schema");
        Ok(result)
    }

    /// Update a field's metadata. Fields are addressed by id within the base.
    pub async fn update_field(&self, params: UpdateFieldParams) -> Value {
        let field = params.field_id.clone().unwrap_or_default();
        tracing::info!(field_id = %field, "Update field request");
        finish("update field", &field, self.try_update_field(params).await)
    }

    async fn try_update_field(&self, params: UpdateFieldParams) -> Result<Value, OperationError> {
        let field_id = params
            .field_id
            .ok_or_else(|| OperationError::validation("field_id is required"))?;
        let field_data = match params.field_data {
            Some(Value::Object(map)) if !map.is_empty() => Value::Object(map),
            _ => {
                return Err(OperationError::validation(
                    "field_data must be a non-empty dictionary",
                ));
            }
        };

        let client = self.provider.acquire()?;
        let path = endpoints::field(client.base_id(), &field_id);
        tracing::debug!(path = %path, payload = %field_data, "Patching field");

        let result = client.send_json(Method::PATCH, &path, &field_data).await?;
        tracing::info!(field_id = %field_id, base_id = %client.base_id(), "Updated field");
        Ok(result)
    }

    /// List the tables of the configured base.
    pub async fn list_tables(&self, params: ListTablesParams) -> Value {
        tracing::info!(
            page = params.page,
            page_size = params.page_size,
            sort = ?params.sort,
            include_m2m = params.include_m2m,
            "List tables request"
        );
        let base_id = self.provider.config().base_id.clone();
        finish("list tables", &base_id, self.try_list_tables(params).await)
    }

    async fn try_list_tables(&self, params: ListTablesParams) -> Result<Value, OperationError> {
        let client = self.provider.acquire()?;
        let result = client
            .get_json(&endpoints::base_tables(client.base_id()), &params.query())
            .await?;

        let count = result
            .get("list")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        tracing::info!(count, page = params.page, "Retrieved tables");
        Ok(result)
    }
}

fn require_table_name(table_name: &str) -> Result<(), OperationError> {
    if table_name.trim().is_empty() {
        return Err(OperationError::validation("Table name is required"));
    }
    Ok(())
}

/// Convert the outcome of an operation into its envelope.
fn finish(operation: &str, target: &str, result: Result<Value, OperationError>) -> Value {
    match result {
        Ok(value) => value,
        Err(err) => {
            match &err {
                OperationError::Backend { status, body } => {
                    tracing::error!(operation, target, status, body = %body, "Backend returned an error");
                }
                other => {
                    tracing::error!(operation, target, error = %other, "Operation failed");
                }
            }
            err.into_envelope()
        }
    }
}
