//! MCP server tests.
//!
//! Drives `tools/call` through the server, the executor and the translator
//! into the mock backend.

use super::common::*;
use nocodb_core::McpConfig;
use nocodb_mcp::protocol::{JsonRpcRequest, ToolContent};
use nocodb_mcp::{CallToolResponse, McpServer};
use serde_json::{Value, json};

fn server(ctx: &TestContext) -> McpServer {
    McpServer::new(McpConfig::default()).with_translator(ctx.translator())
}

async fn call(server: &McpServer, name: &str, arguments: Value) -> CallToolResponse {
    let request = JsonRpcRequest::new(
        1,
        "tools/call",
        Some(json!({ "name": name, "arguments": arguments })),
    );
    let response = server
        .handle_request(request)
        .await
        .expect("tools/call always answers");
    assert!(response.error.is_none(), "unexpected JSON-RPC error: {:?}", response.error);
    serde_json::from_value(response.result.unwrap()).unwrap()
}

pub async fn test_call_returns_text_and_structured_content(ctx: &TestContext) {
    println!("  🧪 test_call_returns_text_and_structured_content");

    ctx.backend.reset().await;
    ctx.backend
        .on(
            "GET",
            &record_path(CUSTOMERS_ID, "123"),
            MockResponse::json(200, json!({"Id": 123, "Name": "Jane"})),
        )
        .await;

    let response = call(
        &server(ctx),
        "retrieve_records",
        json!({"table_name": "Customers", "row_id": 123}),
    )
    .await;

    assert_eq!(response.is_error, Some(false));
    assert_eq!(response.structured_content, Some(json!({"Id": 123, "Name": "Jane"})));
    let ToolContent::Text { text } = &response.content[0];
    assert_eq!(
        serde_json::from_str::<Value>(text).unwrap(),
        json!({"Id": 123, "Name": "Jane"})
    );

    println!("     ✓ Integer row_id normalised, envelope returned twice");
}

pub async fn test_call_bulk_ids_as_integers(ctx: &TestContext) {
    println!("  🧪 test_call_bulk_ids_as_integers");

    ctx.backend.reset().await;
    ctx.backend
        .on("DELETE", &bulk_path(CUSTOMERS_ID), MockResponse::text(204, ""))
        .await;

    let response = call(
        &server(ctx),
        "delete_records",
        json!({"table_name": "Customers", "bulk": true, "bulk_ids": [1, "2"]}),
    )
    .await;

    assert_eq!(response.is_error, Some(false));
    let request = &ctx.backend.data_requests().await[0];
    assert_eq!(request.body, Some(json!({"ids": ["1", "2"]})));

    println!("     ✓ Mixed identifiers sent as strings");
}

pub async fn test_call_backend_error_sets_is_error(ctx: &TestContext) {
    println!("  🧪 test_call_backend_error_sets_is_error");

    ctx.backend.reset().await;
    ctx.backend
        .on(
            "PATCH",
            &record_path(ORDERS_ID, "1"),
            MockResponse::text(422, "Invalid column"),
        )
        .await;

    let response = call(
        &server(ctx),
        "update_records",
        json!({"table_name": "Orders", "row_id": "1", "data": {"nope": 1}}),
    )
    .await;

    assert_eq!(response.is_error, Some(true));
    let envelope = response.structured_content.unwrap();
    assert_eq!(envelope["status_code"], 422);
    assert_eq!(envelope["message"], "HTTP error: Invalid column");

    println!("     ✓ Backend failure reported as a tool error");
}

pub async fn test_executor_decodes_arguments(ctx: &TestContext) {
    println!("  🧪 test_executor_decodes_arguments");

    ctx.backend.reset().await;
    let result = ctx
        .executor()
        .execute("list_tables", json!({"page_size": 5}))
        .await;

    assert_tool_success(&result, "list_tables via executor");
    let request = &ctx.backend.requests().await[0];
    assert_eq!(request.query_value("pageSize"), Some("5"));
    assert_eq!(request.query_value("page"), Some("1"));

    println!("     ✓ Omitted arguments take their defaults");
}

// =============================================================================
// RUN ALL TESTS
// =============================================================================

pub async fn run_all_tests(ctx: &TestContext) {
    println!("\n📦 MCP Server Tests");
    println!("{}", "=".repeat(50));

    test_call_returns_text_and_structured_content(ctx).await;
    test_call_bulk_ids_as_integers(ctx).await;
    test_call_backend_error_sets_is_error(ctx).await;
    test_executor_decodes_arguments(ctx).await;

    println!("\n✅ All MCP server tests passed!");
}
