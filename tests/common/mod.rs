//! Shared test infrastructure: a mocked Storage API and binary runner.

use serde_json::{json, Value};
use std::path::Path;
use std::process::{Command, Output};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

/// Storage API mock. Anything no mounted route answers gets a structured 404.
pub async fn storage_api() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "Route not found", "code": "notFound"})),
        )
        .with_priority(u8::MAX)
        .mount(&server)
        .await;
    server
}

/// Route that only matches requests carrying the test token.
pub fn route(http_method: &str, route_path: &str) -> MockBuilder {
    Mock::given(method(http_method))
        .and(path(route_path))
        .and(header("X-StorageApi-Token", TOKEN))
}

pub async fn mount_json(
    server: &MockServer,
    http_method: &str,
    route_path: &str,
    status: u16,
    body: Value,
) {
    route(http_method, route_path)
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// `METHOD /path` for every request the server received, in order.
pub async fn request_lines(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .map(|request| format!("{} {}", request.method, request.url.path()))
        .collect()
}

/// Create a data directory holding `config.json`.
pub fn data_dir(config: &Value) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create data dir");
    std::fs::write(dir.path().join("config.json"), config.to_string()).expect("write config");
    dir
}

/// Run the component binary against `server` with the test token.
pub async fn run_component(server: &MockServer, data_dir: &Path, extra_args: &[&str]) -> Output {
    run_binary(server, Some(TOKEN), data_dir, extra_args).await
}

/// Run the component binary with no `KBC_TOKEN` set.
pub async fn run_component_without_token(server: &MockServer, data_dir: &Path) -> Output {
    run_binary(server, None, data_dir, &[]).await
}

async fn run_binary(
    server: &MockServer,
    token: Option<&str>,
    data_dir: &Path,
    extra_args: &[&str],
) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_trigger-sync"));
    command
        .arg("--data-dir")
        .arg(data_dir)
        .args(extra_args)
        .env("KBC_URL", server.uri())
        .env_remove("KBC_DATADIR")
        .env_remove("RUST_LOG")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy");
    match token {
        Some(token) => command.env("KBC_TOKEN", token),
        None => command.env_remove("KBC_TOKEN"),
    };
    tokio::task::spawn_blocking(move || command.output())
        .await
        .expect("join trigger-sync")
        .expect("run trigger-sync")
}

pub fn trigger_json(id: &str, configuration_id: &str, last_run: &str, tables: &[&str]) -> Value {
    json!({
        "id": id,
        "component": "keboola.orchestrator",
        "configurationId": configuration_id,
        "runWithTokenId": 456,
        "coolDownPeriodMinutes": 15,
        "lastRun": last_run,
        "creatorToken": {"id": 456, "description": "flow owner"},
        "tables": tables.iter().map(|id| json!({"tableId": id})).collect::<Vec<_>>()
    })
}
