//! Tests for the HTTP document store writer.

use super::*;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(address: &str) -> DestinationConfig {
    DestinationConfig {
        address: address.to_string(),
        username: None,
        password: None,
        timeout_secs: None,
    }
}

#[test]
fn test_http_store_rejects_bad_address() {
    assert!(HttpDocumentStore::new(&test_config("couch:5984"), false).is_err());
}

#[test]
fn test_http_store_document_url() {
    let store = HttpDocumentStore::new(&test_config("http://couch:5984/"), false).unwrap();
    let url = store
        .document_url(Collection::RoomConfigurations, "Default")
        .unwrap();
    assert_eq!(url.as_str(), "http://couch:5984/room_configurations/Default");
    assert_eq!(store.sink_type(), "http");
}

#[tokio::test]
async fn test_http_store_puts_json_document() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/buildings/ITB"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"_id": "ITB"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpDocumentStore::new(&test_config(&server.uri()), false).unwrap();
    store
        .put(Collection::Buildings, "ITB", br#"{"_id":"ITB"}"#.to_vec())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_store_sends_basic_auth_with_full_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.username = Some("admin".to_string());
    config.password = Some("secret".to_string());

    let store = HttpDocumentStore::new(&config, false).unwrap();
    store
        .put(Collection::Rooms, "ITB-1101", b"{}".to_vec())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_store_skips_auth_with_partial_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.username = Some("admin".to_string());
    config.password = Some(String::new());

    let store = HttpDocumentStore::new(&config, false).unwrap();
    store
        .put(Collection::Rooms, "ITB-1101", b"{}".to_vec())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_http_store_encodes_ids() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let store = HttpDocumentStore::new(&test_config(&server.uri()), false).unwrap();
    store
        .put(Collection::Devices, "ITB-1101-Left Display", b"{}".to_vec())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/devices/ITB-1101-Left%20Display");
}

#[tokio::test]
async fn test_http_store_rejects_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(409).set_body_string(r#"{"error":"conflict"}"#))
        .mount(&server)
        .await;

    let store = HttpDocumentStore::new(&test_config(&server.uri()), false).unwrap();
    let result = store
        .put(Collection::Buildings, "ITB", b"{}".to_vec())
        .await;

    match result {
        Err(Error::Rejected { status, body, .. }) => {
            assert_eq!(status, 409);
            assert!(body.contains("conflict"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_store_tolerates_status_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = HttpDocumentStore::new(&test_config(&server.uri()), true).unwrap();
    assert!(store
        .put(Collection::Buildings, "ITB", b"{}".to_vec())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_http_store_unreachable_is_transport_error() {
    let store = HttpDocumentStore::new(&test_config("http://127.0.0.1:1"), true).unwrap();
    let result = store
        .put(Collection::Buildings, "ITB", b"{}".to_vec())
        .await;

    assert!(matches!(result, Err(Error::Transport(_))));
}
