//! NocoDB REST endpoint paths.
//!
//! Record and table-metadata endpoints live under `/api/v2`, field metadata
//! under `/api/v3`.

pub fn base_tables(base_id: &str) -> String {
    format!("/api/v2/meta/bases/{}/tables", base_id)
}

pub fn table_meta(table_id: &str) -> String {
    format!("/api/v2/meta/tables/{}", table_id)
}

pub fn records(table_id: &str) -> String {
    format!("/api/v2/tables/{}/records", table_id)
}

pub fn record(table_id: &str, row_id: &str) -> String {
    format!("/api/v2/tables/{}/records/{}", table_id, row_id)
}

pub fn records_bulk(table_id: &str) -> String {
    format!("/api/v2/tables/{}/records/bulk", table_id)
}

pub fn field(base_id: &str, field_id: &str) -> String {
    format!("/api/v3/meta/bases/{}/fields/{}", base_id, field_id)
}
