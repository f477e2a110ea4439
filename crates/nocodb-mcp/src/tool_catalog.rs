//! The fixed catalog of NocoDB tools.
//!
//! | Tool | Backend call |
//! |------|--------------|
//! | `retrieve_records` | GET one record or a page of records |
//! | `create_records` | POST one record or a bulk insert |
//! | `update_records` | PATCH one record or a bulk update by ids |
//! | `delete_records` | DELETE one record or a bulk delete by ids |
//! | `get_schema` | GET table metadata with columns |
//! | `update_field` | PATCH field metadata |
//! | `list_tables` | GET the tables of the base |

use crate::protocol::{ToolAnnotations, ToolDefinition};
use serde_json::{Value, json};

/// The operations exposed as tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    RetrieveRecords,
    CreateRecords,
    UpdateRecords,
    DeleteRecords,
    GetSchema,
    UpdateField,
    ListTables,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::RetrieveRecords,
        Operation::CreateRecords,
        Operation::UpdateRecords,
        Operation::DeleteRecords,
        Operation::GetSchema,
        Operation::UpdateField,
        Operation::ListTables,
    ];

    /// Tool name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Operation::RetrieveRecords => "retrieve_records",
            Operation::CreateRecords => "create_records",
            Operation::UpdateRecords => "update_records",
            Operation::DeleteRecords => "delete_records",
            Operation::GetSchema => "get_schema",
            Operation::UpdateField => "update_field",
            Operation::ListTables => "list_tables",
        }
    }

    /// Look an operation up by tool name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Tool definition advertised in `tools/list`.
    pub fn definition(self) -> ToolDefinition {
        let (description, input_schema, annotations) = match self {
            Operation::RetrieveRecords => (
                RETRIEVE_DESCRIPTION,
                retrieve_schema(),
                read_only(),
            ),
            Operation::CreateRecords => (CREATE_DESCRIPTION, create_schema(), write(false)),
            Operation::UpdateRecords => (UPDATE_DESCRIPTION, update_schema(), write(false)),
            Operation::DeleteRecords => (DELETE_DESCRIPTION, delete_schema(), write(true)),
            Operation::GetSchema => (SCHEMA_DESCRIPTION, table_name_schema(), read_only()),
            Operation::UpdateField => (FIELD_DESCRIPTION, field_schema(), write(false)),
            Operation::ListTables => (LIST_TABLES_DESCRIPTION, list_tables_schema(), read_only()),
        };

        ToolDefinition {
            name: self.name().to_string(),
            description: Some(description.to_string()),
            input_schema,
            annotations: Some(annotations),
        }
    }
}

/// Definitions of every tool, in catalog order.
pub fn all_tools() -> Vec<ToolDefinition> {
    Operation::ALL.into_iter().map(Operation::definition).collect()
}

fn read_only() -> ToolAnnotations {
    ToolAnnotations {
        read_only: Some(true),
        destructive: Some(false),
        idempotent: Some(true),
    }
}

fn write(destructive: bool) -> ToolAnnotations {
    ToolAnnotations {
        read_only: Some(false),
        destructive: Some(destructive),
        idempotent: None,
    }
}

fn table_name_property() -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": "Display name of the table, exactly as shown in NocoDB"
    })
}

fn identifier_property(description: &str) -> Value {
    json!({
        "type": ["string", "integer"],
        "description": description
    })
}

fn bulk_ids_property(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": ["string", "integer"] },
        "description": description
    })
}

fn retrieve_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "table_name": table_name_property(),
            "row_id": identifier_property("Specific row ID to retrieve a single record"),
            "filters": {
                "type": "string",
                "description": "Filter conditions in NocoDB format, e.g. \"(column,eq,value)\", chained with ~and / ~or"
            },
            "limit": {
                "type": ["integer", "null"],
                "minimum": 0,
                "default": 10,
                "description": "Maximum number of records to return"
            },
            "offset": {
                "type": ["integer", "null"],
                "minimum": 0,
                "default": 0,
                "description": "Number of records to skip for pagination"
            },
            "sort": {
                "type": "string",
                "description": "Column to sort by, use a \"-\" prefix for descending order"
            },
            "fields": {
                "type": "string",
                "description": "Comma-separated list of fields to include in the response"
            }
        },
        "required": ["table_name"]
    })
}

fn create_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "table_name": table_name_property(),
            "data": {
                "oneOf": [
                    { "type": "object" },
                    { "type": "array", "items": { "type": "object" } }
                ],
                "description": "Column:value mapping for one record, or a list of mappings for bulk creation"
            },
            "bulk": {
                "type": "boolean",
                "default": false,
                "description": "Set to true to insert several records at once"
            }
        },
        "required": ["table_name", "data"]
    })
}

fn update_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "table_name": table_name_property(),
            "row_id": identifier_property("ID of the record to update (single record update)"),
            "data": {
                "type": "object",
                "description": "Column:value pairs to update; applied to every record in bulk mode"
            },
            "bulk": {
                "type": "boolean",
                "default": false,
                "description": "Set to true for bulk updates by ID"
            },
            "bulk_ids": bulk_ids_property("Record IDs to update when bulk is true")
        },
        "required": ["table_name", "data"]
    })
}

fn delete_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "table_name": table_name_property(),
            "row_id": identifier_property("ID of the record to delete (single record deletion)"),
            "bulk": {
                "type": "boolean",
                "default": false,
                "description": "Set to true for bulk deletion by ID"
            },
            "bulk_ids": bulk_ids_property("Record IDs to delete when bulk is true")
        },
        "required": ["table_name"]
    })
}

fn table_name_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "table_name": table_name_property()
        },
        "required": ["table_name"]
    })
}

fn field_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "field_id": identifier_property("Unique identifier of the field to update"),
            "field_data": {
                "type": "object",
                "minProperties": 1,
                "description": "Field properties to update: title, type, default_value, description, options"
            }
        },
        "required": ["field_id", "field_data"]
    })
}

fn list_tables_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "page": { "type": "integer", "minimum": 1, "default": 1 },
            "page_size": { "type": "integer", "minimum": 1, "default": 25 },
            "sort": { "type": "string", "description": "Sort order for the table list" },
            "include_m2m": {
                "type": "boolean",
                "default": false,
                "description": "Include many-to-many junction tables"
            }
        }
    })
}

const RETRIEVE_DESCRIPTION: &str = "\
Retrieve one or multiple records from a NocoDB table.

Supports single record retrieval by ID and multi-record retrieval with filtering, \
sorting, pagination and field selection.

Examples:
1. All records (limited to 10): retrieve_records(table_name=\"customers\")
2. One record: retrieve_records(table_name=\"customers\", row_id=\"123\")
3. Filter: retrieve_records(table_name=\"customers\", filters=\"(age,gt,30)~and(status,eq,active)\")
4. Paginate: retrieve_records(table_name=\"customers\", limit=20, offset=40)
5. Sort: retrieve_records(table_name=\"customers\", sort=\"-created_at\")
6. Select fields: retrieve_records(table_name=\"customers\", fields=\"id,name,email\")";

const CREATE_DESCRIPTION: &str = "\
Create one or multiple records in a NocoDB table.

Examples:
1. Single record: create_records(table_name=\"customers\", data={\"name\": \"John Doe\", \"age\": 35})
2. Bulk: create_records(table_name=\"customers\", data=[{\"name\": \"John\"}, {\"name\": \"Jane\"}], bulk=true)

With bulk=true a single mapping is wrapped in a list; with bulk=false only the first \
element of a list is used.";

const UPDATE_DESCRIPTION: &str = "\
Update one or multiple records in a NocoDB table.

Examples:
1. By ID: update_records(table_name=\"customers\", row_id=\"123\", data={\"status\": \"inactive\"})
2. Bulk: update_records(table_name=\"customers\", data={\"status\": \"inactive\"}, bulk=true, bulk_ids=[\"123\", \"456\"])

In bulk mode the same data is applied to every listed record.";

const DELETE_DESCRIPTION: &str = "\
Delete one or multiple records from a NocoDB table.

Examples:
1. By ID: delete_records(table_name=\"customers\", row_id=\"123\")
2. Bulk: delete_records(table_name=\"customers\", bulk=true, bulk_ids=[\"123\", \"456\", \"789\"])";

const SCHEMA_DESCRIPTION: &str = "\
Retrieve the schema of a NocoDB table.

Returns the full table metadata; the column definitions are in its \"columns\" field.

Example: get_schema(table_name=\"products\")";

const FIELD_DESCRIPTION: &str = "\
Update the metadata of a field in the NocoDB base (title, type, default value, \
description, options).

Example: update_field(field_id=\"f456\", field_data={\"title\": \"New Field\", \"type\": \"SingleLineText\"})";

const LIST_TABLES_DESCRIPTION: &str = "\
List the tables of the NocoDB base, with pagination, sorting and optional \
many-to-many junction tables.

Example: list_tables(page=1, page_size=50, include_m2m=true)";
