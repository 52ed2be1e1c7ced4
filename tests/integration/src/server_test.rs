//! End-to-end tests over a real HTTP listener
//!
//! Each test boots the full stack (transport, dispatcher, controllers,
//! filesystem storage) on an ephemeral port and drives it with a plain
//! HTTP client, the way an MCP client on the wire would.

use std::path::Path;
use std::time::Duration;

use bank_mcp::routes::build_router;
use bank_mcp::{McpServer, ServerInfo, SseServerTransport, TransportConfig};
use serde_json::{json, Value};
use tempfile::TempDir;

fn test_transport_config(ping_interval: Duration) -> TransportConfig {
    TransportConfig {
        hostname: "127.0.0.1".to_string(),
        port: 0,
        ping_interval,
        ..TransportConfig::default()
    }
}

async fn start_server(root: &Path, ping_interval: Duration) -> (SseServerTransport, String) {
    let server = McpServer::new(
        build_router(root),
        ServerInfo {
            name: "context-bank".to_string(),
            version: "1.0.0".to_string(),
        },
    );
    let transport = server
        .serve(test_transport_config(ping_interval))
        .await
        .unwrap();
    let url = format!("http://127.0.0.1:{}/mcp", transport.port().unwrap());
    (transport, url)
}

async fn post_raw(url: &str, body: impl Into<String>) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(url)
        .header("content-type", "application/json")
        .body(body.into())
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    let body: Value = response.json().await.unwrap();
    (status, body)
}

async fn rpc(url: &str, id: i64, method: &str, params: Value) -> Value {
    let (status, body) = post_raw(
        url,
        json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}).to_string(),
    )
    .await;
    assert_eq!(status, 200);
    body
}

async fn call_tool(url: &str, id: i64, name: &str, arguments: Value) -> Value {
    rpc(url, id, "tools/call", json!({"name": name, "arguments": arguments})).await
}

fn result_text(envelope: &Value) -> &str {
    envelope["result"]["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn initialize_reports_exact_negotiation_payload() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    let body = rpc(&url, 1, "initialize", Value::Null).await;
    assert_eq!(
        body,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "protocolVersion": "2024-11-05",
                "capabilities": {"tools": {}},
                "serverInfo": {"name": "context-bank", "version": "1.0.0"},
            },
        })
    );

    transport.stop().await;
}

#[tokio::test]
async fn tools_list_advertises_all_six_tools() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    let body = rpc(&url, 2, "tools/list", Value::Null).await;
    let tools = body["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "list_projects",
            "list_project_files",
            "context_read",
            "context_write",
            "context_update",
            "context_retrieve",
        ]
    );
    for tool in tools {
        assert!(tool.get("inputSchema").is_some());
        assert!(tool.get("description").is_some());
    }

    transport.stop().await;
}

#[tokio::test]
async fn file_lifecycle_over_http() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    let body = call_tool(
        &url,
        1,
        "context_write",
        json!({"projectName": "demo", "fileName": "notes.md", "content": "first draft"}),
    )
    .await;
    assert!(body.get("error").is_none(), "{body}");
    assert!(result_text(&body).contains("created successfully"));

    let body = call_tool(&url, 2, "list_projects", json!({})).await;
    let projects: Value = serde_json::from_str(result_text(&body)).unwrap();
    assert_eq!(projects, json!(["demo"]));

    let body = call_tool(&url, 3, "list_project_files", json!({"projectName": "demo"})).await;
    let files: Value = serde_json::from_str(result_text(&body)).unwrap();
    assert_eq!(files, json!(["notes.md"]));

    let body = call_tool(
        &url,
        4,
        "context_read",
        json!({"projectName": "demo", "fileName": "notes.md"}),
    )
    .await;
    assert_eq!(result_text(&body), "first draft");

    // Creating an existing file is a validation failure, not an overwrite.
    let body = call_tool(
        &url,
        5,
        "context_write",
        json!({"projectName": "demo", "fileName": "notes.md", "content": "clobber"}),
    )
    .await;
    assert_eq!(body["error"]["code"], -32602);

    let body = call_tool(
        &url,
        6,
        "context_update",
        json!({"projectName": "demo", "fileName": "notes.md", "content": "second draft"}),
    )
    .await;
    assert!(result_text(&body).contains("updated successfully"));

    let body = call_tool(
        &url,
        7,
        "context_read",
        json!({"projectName": "demo", "fileName": "notes.md"}),
    )
    .await;
    assert_eq!(result_text(&body), "second draft");

    // Updating a file that was never created fails the same way.
    let body = call_tool(
        &url,
        8,
        "context_update",
        json!({"projectName": "demo", "fileName": "ghost.md", "content": "x"}),
    )
    .await;
    assert_eq!(body["error"]["code"], -32602);

    transport.stop().await;
}

#[tokio::test]
async fn missing_arguments_are_invalid_params() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    let body = call_tool(&url, 1, "context_read", json!({"projectName": "demo"})).await;
    let error = &body["error"];
    assert_eq!(error["code"], -32602);
    assert!(
        error["message"].as_str().unwrap().contains("fileName"),
        "{error}"
    );

    transport.stop().await;
}

#[tokio::test]
async fn retrieve_from_empty_project_reports_zero_files() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir(root.path().join("demo")).unwrap();
    let local = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    let body = call_tool(
        &url,
        2,
        "context_retrieve",
        json!({
            "projectName": "demo",
            "localPath": local.path().to_str().unwrap(),
        }),
    )
    .await;

    assert!(body.get("error").is_none(), "{body}");
    let text = result_text(&body);
    assert!(text.contains("Retrieved 0 file(s) from project demo"), "{text}");
    assert!(text.contains("0 file(s) written"), "{text}");
    assert!(!text.contains("error(s) occurred"), "{text}");

    transport.stop().await;
}

#[tokio::test]
async fn retrieve_copies_files_to_local_directory() {
    let root = TempDir::new().unwrap();
    let local = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    for (name, content) in [("a.md", "alpha"), ("b.md", "beta")] {
        let body = call_tool(
            &url,
            1,
            "context_write",
            json!({"projectName": "demo", "fileName": name, "content": content}),
        )
        .await;
        assert!(body.get("error").is_none(), "{body}");
    }

    let body = call_tool(
        &url,
        2,
        "context_retrieve",
        json!({
            "projectName": "demo",
            "localPath": local.path().to_str().unwrap(),
        }),
    )
    .await;

    let text = result_text(&body);
    assert!(text.contains("Retrieved 2 file(s) from project demo"), "{text}");
    assert_eq!(
        std::fs::read_to_string(local.path().join("a.md")).unwrap(),
        "alpha"
    );
    assert_eq!(
        std::fs::read_to_string(local.path().join("b.md")).unwrap(),
        "beta"
    );

    transport.stop().await;
}

#[tokio::test]
async fn unknown_method_and_tool_yield_method_not_found() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    let body = rpc(&url, 1, "resources/list", Value::Null).await;
    assert_eq!(body["error"]["code"], -32601);

    let body = call_tool(&url, 2, "context_zap", json!({})).await;
    assert_eq!(body["error"]["code"], -32601);
    assert!(body["error"]["message"].as_str().unwrap().contains("context_zap"));

    transport.stop().await;
}

#[tokio::test]
async fn malformed_body_yields_internal_error_with_null_id() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    let (status, body) = post_raw(&url, "not-json").await;
    assert_eq!(status, 200);
    assert_eq!(body["jsonrpc"], "2.0");
    assert!(body.get("id").is_some(), "id key must be present: {body}");
    assert!(body["id"].is_null());
    assert_eq!(body["error"]["code"], -32603);

    transport.stop().await;
}

#[tokio::test]
async fn id_is_salvaged_from_partially_valid_body() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    // Valid JSON, invalid envelope: method has the wrong type.
    let (status, body) = post_raw(&url, r#"{"jsonrpc":"2.0","id":7,"method":42}"#).await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], 7);
    assert_eq!(body["error"]["code"], -32603);

    transport.stop().await;
}

#[tokio::test]
async fn post_before_processor_attached_is_not_ready() {
    let mut transport = SseServerTransport::new(test_transport_config(Duration::from_secs(30)));
    transport.start().await.unwrap();
    let url = format!("http://127.0.0.1:{}/mcp", transport.port().unwrap());

    let (status, body) = post_raw(
        &url,
        json!({"jsonrpc": "2.0", "id": 9, "method": "initialize"}).to_string(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], 9);
    assert_eq!(body["error"]["code"], -32603);
    assert_eq!(body["error"]["message"], "Request processor not initialized");

    transport.stop().await;
}

#[tokio::test]
async fn unknown_routes_are_plain_404() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;
    let base = url.trim_end_matches("/mcp");

    let response = reqwest::get(format!("{base}/elsewhere")).await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/plain"
    );
    assert_eq!(response.text().await.unwrap(), "Not Found");

    transport.stop().await;
}

#[tokio::test]
async fn preflight_succeeds_on_any_path() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;
    let base = url.trim_end_matches("/mcp").to_string();
    let client = reqwest::Client::new();

    for path in ["/mcp", "/anywhere/else"] {
        let response = client
            .request(reqwest::Method::OPTIONS, format!("{base}{path}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200, "{path}");
        assert_eq!(
            response.headers()["access-control-allow-origin"]
                .to_str()
                .unwrap(),
            "*"
        );
    }

    transport.stop().await;
}

#[tokio::test]
async fn sse_stream_opens_with_connected_event() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    let mut response = reqwest::get(&url).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let chunk = response.chunk().await.unwrap().unwrap();
    let frame = String::from_utf8(chunk.to_vec()).unwrap();
    assert!(frame.contains("event: connected"), "{frame}");
    assert!(frame.contains("connectionId"), "{frame}");
    assert_eq!(transport.connection_count(), 1);

    // Client disconnect releases the registry entry.
    drop(response);
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while transport.connection_count() != 0 {
        assert!(tokio::time::Instant::now() < deadline, "connection not released");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    transport.stop().await;
}

#[tokio::test]
async fn sse_stream_carries_periodic_pings() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_millis(50)).await;

    let mut response = reqwest::get(&url).await.unwrap();
    let mut seen = String::new();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !seen.contains("event: ping") {
        assert!(tokio::time::Instant::now() < deadline, "no ping before deadline");
        let chunk = response.chunk().await.unwrap().unwrap();
        seen.push_str(&String::from_utf8_lossy(&chunk));
    }
    assert!(seen.contains("timestamp"), "{seen}");

    transport.stop().await;
}

#[tokio::test]
async fn broadcast_reaches_open_streams() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    let mut response = reqwest::get(&url).await.unwrap();
    // Consume the connected frame first.
    let _ = response.chunk().await.unwrap().unwrap();

    transport.broadcast("announcement", &json!({"note": "maintenance soon"}));

    let chunk = response.chunk().await.unwrap().unwrap();
    let frame = String::from_utf8(chunk.to_vec()).unwrap();
    assert!(frame.contains("event: announcement"), "{frame}");
    assert!(frame.contains("maintenance soon"), "{frame}");

    transport.stop().await;
}

#[tokio::test]
async fn stop_ends_open_streams() {
    let root = TempDir::new().unwrap();
    let (mut transport, url) = start_server(root.path(), Duration::from_secs(30)).await;

    let mut response = reqwest::get(&url).await.unwrap();
    let _ = response.chunk().await.unwrap().unwrap();

    transport.stop().await;

    // The stream terminates rather than hanging.
    let end = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            match response.chunk().await {
                Ok(Some(_)) => continue,
                Ok(None) => break true,
                Err(_) => break true,
            }
        }
    })
    .await
    .expect("stream did not end after stop");
    assert!(end);
}
