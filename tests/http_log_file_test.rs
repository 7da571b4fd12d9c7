//! End-to-end tests for the rephrase exchange log
//!
//! Lives in its own test binary: the log flag is read once per process, so
//! it is switched on here before any client call.

use std::fs;
use std::sync::Once;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prompt_perfect::http_logger::{is_enabled, ENV_HTTP_LOG, LOG_FILE_NAME};
use prompt_perfect::storage::DATA_DIR_NAME;
use prompt_perfect::{Config, ConfigOptions, EnhancementClient};

fn enable_http_log() {
    static INIT: Once = Once::new();
    INIT.call_once(|| std::env::set_var(ENV_HTTP_LOG, "1"));
    assert!(is_enabled());
}

fn create_test_client(base_url: &str, temp_dir: &TempDir) -> EnhancementClient {
    let config = Config::new(
        Some(base_url.to_string()),
        ConfigOptions {
            request_timeout_secs: Some(30),
            store_dir: Some(temp_dir.path().to_path_buf()),
        },
    )
    .unwrap();
    EnhancementClient::new(config).unwrap()
}

fn read_log(temp_dir: &TempDir) -> String {
    fs::read_to_string(temp_dir.path().join(DATA_DIR_NAME).join(LOG_FILE_NAME)).unwrap()
}

#[tokio::test]
async fn test_successful_rephrase_is_logged() {
    enable_http_log();
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/rephrase"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"text": "A sprawling neon metropolis"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri(), &temp_dir);
    client.rephrase("A futuristic city").await.unwrap();

    let log = read_log(&temp_dir);
    assert!(log.contains(&format!("POST {}/api/rephrase", mock_server.uri())));
    assert!(log.contains("\"text\": \"A futuristic city\""));
    assert!(log.contains("Status: 200"));
    assert!(log.contains("A sprawling neon metropolis"));
}

#[tokio::test]
async fn test_failed_rephrase_is_logged() {
    enable_http_log();
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/rephrase"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri(), &temp_dir);
    assert!(client.rephrase("prompt").await.is_err());

    let log = read_log(&temp_dir);
    assert!(log.contains("Status: 500"));
    assert!(log.contains("upstream exploded"));
}

#[tokio::test]
async fn test_transport_error_is_logged() {
    enable_http_log();
    let temp_dir = TempDir::new().unwrap();

    let client = create_test_client("", &temp_dir);
    assert!(client.rephrase("prompt").await.is_err());

    let log = read_log(&temp_dir);
    assert!(log.contains("POST /api/rephrase"));
    assert!(log.contains("--- Error ("));
}

#[tokio::test]
async fn test_each_exchange_appends_an_entry() {
    enable_http_log();
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/rephrase"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "ok"})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri(), &temp_dir);
    client.rephrase("first").await.unwrap();
    client.rephrase("second").await.unwrap();

    let log = read_log(&temp_dir);
    assert_eq!(log.matches("Status: 200").count(), 2);
    assert!(log.contains("\"text\": \"first\""));
    assert!(log.contains("\"text\": \"second\""));
}
