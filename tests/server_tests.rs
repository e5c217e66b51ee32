//! End-to-end JSON-RPC sessions through the in-memory I/O loop.

use serde_json::{Value, json};
use simpleapi_mcp::config::Config;
use simpleapi_mcp::server::{self, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, RESOURCE_NOT_FOUND};
use simpleapi_mcp::{AdapterConfig, BearerToken, RemoteFetchClient, RetryPolicy};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::BufReader;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(upstream: &MockServer) -> Arc<RemoteFetchClient> {
    let token = BearerToken::new("session-token").unwrap();
    let config = AdapterConfig::new(&upstream.uri(), token)
        .unwrap()
        .with_retry(RetryPolicy::none());
    Arc::new(RemoteFetchClient::new(config).unwrap())
}

/// Feed `requests` one per line and index the responses by id.
async fn run_session(
    client: Arc<RemoteFetchClient>,
    config: &Config,
    requests: &[Value],
) -> HashMap<i64, Value> {
    let input: String = requests.iter().map(|r| format!("{r}\n")).collect();
    let server = server::build_server(client, config);
    let mut output: Vec<u8> = Vec::new();
    server::run_with_io(server, BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| {
            let v: Value = serde_json::from_str(line).unwrap();
            (v["id"].as_i64().unwrap(), v)
        })
        .collect()
}

fn call(id: i64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

#[tokio::test]
async fn handshake_lists_tools_and_resources() {
    let upstream = MockServer::start().await;
    let responses = run_session(
        client_for(&upstream),
        &Config::default(),
        &[
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized", "params": {} }),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list", "params": {} }),
            json!({ "jsonrpc": "2.0", "id": 3, "method": "resources/list", "params": {} }),
            json!({ "jsonrpc": "2.0", "id": 4, "method": "ping", "params": {} }),
        ],
    )
    .await;

    assert_eq!(responses.len(), 4, "notification must not produce output");

    let init = &responses[&1]["result"];
    assert_eq!(init["protocolVersion"], server::PROTOCOL_VERSION);
    assert_eq!(init["serverInfo"]["name"], "SimpleAPI");
    assert!(init["capabilities"]["resources"].is_object());

    let tools: Vec<&str> = responses[&2]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(tools, vec!["fetch_news", "fetch_url", "fetch_search"]);

    assert_eq!(responses[&3]["result"]["resources"][0]["uri"], "info://api_version");
    assert_eq!(responses[&4]["result"], json!({}));
}

#[tokio::test]
async fn api_version_resource_reads_fixed_value() {
    let upstream = MockServer::start().await;
    let responses = run_session(
        client_for(&upstream),
        &Config::default(),
        &[
            json!({ "jsonrpc": "2.0", "id": 1, "method": "resources/read", "params": { "uri": "info://api_version" } }),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "resources/read", "params": { "uri": "info://missing" } }),
        ],
    )
    .await;

    let contents = &responses[&1]["result"]["contents"][0];
    assert_eq!(contents["text"], "1.0.0");
    assert_eq!(contents["mimeType"], "text/plain");
    assert_eq!(responses[&2]["error"]["code"], RESOURCE_NOT_FOUND);
}

#[tokio::test]
async fn tool_calls_forward_upstream_json() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/duck/news"))
        .and(query_param("topic", "climate"))
        .and(header("Authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "articles": [] })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/duck/search"))
        .and(query_param("query", "Elon Musk"))
        .and(query_param("num_results", "5"))
        .and(query_param("domain", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": ["a", "b"] })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/duck/search"))
        .and(query_param("query", "whole"))
        .and(query_param("num_results", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": [] })))
        .expect(1)
        .mount(&upstream)
        .await;

    let responses = run_session(
        client_for(&upstream),
        &Config::default(),
        &[
            call(1, "fetch_news", json!({ "topic": "climate" })),
            call(2, "fetch_search", json!({ "query": "Elon Musk", "num_results": 5, "domain": "de" })),
            call(3, "fetch_search", json!({ "query": "whole", "num_results": 5.0 })),
        ],
    )
    .await;

    let news = &responses[&1]["result"];
    assert_eq!(news["content"][0]["text"], r#"{"articles":[]}"#);

    let search_text = responses[&2]["result"]["content"][0]["text"].as_str().unwrap();
    let search: Value = serde_json::from_str(search_text).unwrap();
    assert_eq!(search, json!({ "hits": ["a", "b"] }));

    assert_eq!(responses[&3]["result"]["content"][0]["text"], r#"{"hits":[]}"#);
}

#[tokio::test]
async fn failures_map_to_json_rpc_errors() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w3m"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&upstream)
        .await;

    let responses = run_session(
        client_for(&upstream),
        &Config::default(),
        &[
            call(1, "fetch_url", json!({ "url": "https://example.com" })),
            call(2, "fetch_news", json!({})),
            call(3, "fetch_weather", json!({ "city": "Vienna" })),
            call(4, "fetch_search", json!({ "query": "x", "num_results": "many" })),
            call(5, "fetch_news", json!(["climate"])),
            call(6, "fetch_weather", json!(["not", "an", "object"])),
            call(7, "fetch_search", json!({ "query": "x", "num_results": 1.5 })),
        ],
    )
    .await;

    let upstream_err = &responses[&1]["error"];
    assert_eq!(upstream_err["code"], INTERNAL_ERROR);
    assert!(
        upstream_err["data"].as_str().unwrap().starts_with("Failed to fetch URL:"),
        "{upstream_err}"
    );

    assert_eq!(responses[&2]["error"]["code"], INVALID_PARAMS);
    assert!(responses[&2]["error"]["data"].as_str().unwrap().contains("Missing 'topic' parameter"));

    assert_eq!(responses[&3]["error"]["code"], METHOD_NOT_FOUND);
    assert_eq!(responses[&4]["error"]["code"], INVALID_PARAMS);
    assert_eq!(responses[&5]["error"]["code"], INVALID_PARAMS);
    assert_eq!(responses[&6]["error"]["code"], METHOD_NOT_FOUND);
    assert_eq!(responses[&7]["error"]["code"], INVALID_PARAMS);
}

#[tokio::test]
async fn disabled_tools_are_hidden() {
    let upstream = MockServer::start().await;
    let mut config = Config::default();
    config.features.insert("fetch_search".to_string(), false);

    let responses = run_session(
        client_for(&upstream),
        &config,
        &[
            json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list", "params": {} }),
            call(2, "fetch_search", json!({ "query": "x" })),
        ],
    )
    .await;

    let tools = responses[&1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 2);
    assert_eq!(responses[&2]["error"]["code"], METHOD_NOT_FOUND);
}
