//! Metadata operation tests.
//!
//! Tests get_schema, update_field and list_tables.

use super::common::*;
use nocodb_mcp::params::{GetSchemaParams, ListTablesParams, UpdateFieldParams};
use serde_json::json;

pub async fn test_get_schema(ctx: &TestContext) {
    println!("  🧪 test_get_schema");

    let translator = ctx.fresh().await;
    let meta = json!({
        "id": CUSTOMERS_ID,
        "title": "Customers",
        "columns": [
            {"id": "c1", "title": "Id", "uidt": "ID"},
            {"id": "c2", "title": "Name", "uidt": "SingleLineText"}
        ]
    });
    ctx.backend
        .on(
            "GET",
            &format!("/api/v2/meta/tables/{}", CUSTOMERS_ID),
            MockResponse::json(200, meta.clone()),
        )
        .await;

    let result = translator
        .get_schema(GetSchemaParams {
            table_name: "Customers".to_string(),
        })
        .await;

    assert_eq!(result, meta);
    assert_eq!(result["columns"].as_array().unwrap().len(), 2);

    println!("     ✓ Full table metadata returned");
}

pub async fn test_update_field_uses_v3_path(ctx: &TestContext) {
    println!("  🧪 test_update_field_uses_v3_path");

    ctx.backend.reset().await;
    let translator = ctx.translator();
    let path = format!("/api/v3/meta/bases/{}/fields/f456", BASE_ID);
    ctx.backend
        .on("PATCH", &path, MockResponse::json(200, json!({"id": "f456", "title": "New Field"})))
        .await;

    let field_data = json!({"title": "New Field", "type": "SingleLineText"});
    let result = translator
        .update_field(UpdateFieldParams {
            field_id: Some("f456".to_string()),
            field_data: Some(field_data.clone()),
        })
        .await;

    assert_eq!(result["title"], "New Field");

    let requests = ctx.backend.requests().await;
    assert_eq!(requests.len(), 1, "update_field never resolves a table");
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].path, path);
    assert_eq!(requests[0].body, Some(field_data));

    println!("     ✓ Field patched on the v3 meta endpoint");
}

pub async fn test_list_tables_params(ctx: &TestContext) {
    println!("  🧪 test_list_tables_params");

    let translator = ctx.fresh().await;

    let result = translator
        .list_tables(ListTablesParams {
            page: 2,
            page_size: 50,
            sort: Some("title".to_string()),
            include_m2m: true,
        })
        .await;

    assert_eq!(result, default_tables());

    let requests = ctx.backend.requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.path, format!("/api/v2/meta/bases/{}/tables", BASE_ID));
    assert_eq!(request.query_value("page"), Some("2"));
    assert_eq!(request.query_value("pageSize"), Some("50"));
    assert_eq!(request.query_value("includeM2M"), Some("true"));
    assert_eq!(request.query_value("sort"), Some("title"));

    println!("     ✓ Pagination, sort and includeM2M forwarded");
}

pub async fn test_list_tables_defaults(ctx: &TestContext) {
    println!("  🧪 test_list_tables_defaults");

    let translator = ctx.fresh().await;
    let result = translator.list_tables(ListTablesParams::default()).await;
    assert_success(&result, "list_tables should succeed");

    let request = &ctx.backend.requests().await[0];
    assert_eq!(request.query_value("page"), Some("1"));
    assert_eq!(request.query_value("pageSize"), Some("25"));
    assert_eq!(request.query_value("includeM2M"), Some("false"));
    assert_eq!(request.query_value("sort"), None);

    println!("     ✓ Defaults page=1, pageSize=25, includeM2M=false");
}

pub async fn test_resolution_takes_first_match(ctx: &TestContext) {
    println!("  🧪 test_resolution_takes_first_match");

    let translator = ctx.fresh().await;
    ctx.backend
        .on(
            "GET",
            &format!("/api/v2/meta/bases/{}/tables", BASE_ID),
            MockResponse::json(
                200,
                json!({"list": [
                    {"id": "tbl_first", "title": "Dupes"},
                    {"id": "tbl_second", "title": "Dupes"}
                ]}),
            ),
        )
        .await;
    ctx.backend
        .on(
            "GET",
            "/api/v2/meta/tables/tbl_first",
            MockResponse::json(200, json!({"id": "tbl_first", "columns": []})),
        )
        .await;

    let result = translator
        .get_schema(GetSchemaParams {
            table_name: "Dupes".to_string(),
        })
        .await;

    assert_eq!(result["id"], "tbl_first");

    println!("     ✓ First title match wins");
}

// =============================================================================
// RUN ALL TESTS
// =============================================================================

pub async fn run_all_tests(ctx: &TestContext) {
    println!("\n📦 Schema and Table Tests");
    println!("{}", "=".repeat(50));

    test_get_schema(ctx).await;
    test_update_field_uses_v3_path(ctx).await;
    test_list_tables_params(ctx).await;
    test_list_tables_defaults(ctx).await;
    test_resolution_takes_first_match(ctx).await;

    println!("\n✅ All schema and table tests passed!");
}
