use std::time::Duration;

use reqwest::Method;
use tfe_plan_summary::{ControlPlane, ErrorKind, TfeClient, TfeError};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: Option<&str>) -> TfeClient {
    TfeClient::with_base_url(
        token.map(str::to_string),
        server.uri(),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_request_sends_bearer_and_json_api_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/workspaces/production-infrastructure"))
        .and(header("authorization", "Bearer test_token"))
        .and(header("content-type", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": "ws-abc123", "type": "workspaces" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some("test_token"));

    let document = client
        .request(
            "/organizations/acme/workspaces/production-infrastructure",
            Method::GET,
            None,
        )
        .await
        .unwrap();

    assert_eq!(document["data"]["id"], "ws-abc123");
}

#[tokio::test]
async fn test_request_forwards_serialized_body() {
    let mock_server = MockServer::start().await;
    let payload = r#"{"data":{"type":"runs","attributes":{"plan-only":true}}}"#;

    Mock::given(method("POST"))
        .and(path("/runs"))
        .and(body_string(payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": { "id": "run-new" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some("test_token"));

    let document = client
        .request("/runs", Method::POST, Some(payload))
        .await
        .unwrap();

    assert_eq!(document["data"]["id"], "run-new");
}

#[tokio::test]
async fn test_missing_credential_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": {} })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, None);

    let result = client
        .request("/organizations/acme/workspaces/ws", Method::GET, None)
        .await;

    match result {
        Err(TfeError::Auth { message }) => assert!(message.contains("missing credential")),
        other => panic!("Expected TfeError::Auth, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/workspaces/ws"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errors": [{ "status": "401", "title": "unauthorized" }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some("expired_token"));

    let result = client
        .request("/organizations/acme/workspaces/ws", Method::GET, None)
        .await;

    match result {
        Err(TfeError::Auth { message }) => {
            assert!(message.contains("HTTP 401"));
            assert!(message.contains("unauthorized"));
        }
        other => panic!("Expected TfeError::Auth, got {:?}", other),
    }
}

#[tokio::test]
async fn test_auth_error_does_not_contain_token() {
    let mock_server = MockServer::start().await;
    let secret_token = "tfe_super_secret_token_xyz789";

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "errors": [{ "status": "403", "title": "forbidden" }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some(secret_token));

    let result = client
        .request("/organizations/acme/workspaces/ws", Method::GET, None)
        .await;
    let error_string = format!("{:?}", result);

    assert!(matches!(result, Err(TfeError::Auth { .. })));
    assert!(
        !error_string.contains(secret_token),
        "Error output must not contain the token"
    );
}

#[tokio::test]
async fn test_not_found_without_data_is_protocol_error_with_body() {
    let mock_server = MockServer::start().await;
    let body = r#"{"errors":[{"status":"404","title":"not found"}]}"#;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/workspaces/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some("test_token"));

    let result = client
        .request("/organizations/acme/workspaces/missing", Method::GET, None)
        .await;

    match result {
        Err(TfeError::Protocol { status, body: raw }) => {
            assert_eq!(status, 404);
            assert_eq!(raw, body);
        }
        other => panic!("Expected TfeError::Protocol, got {:?}", other),
    }
}

#[tokio::test]
async fn test_success_without_data_key_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runs/run-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "meta": {} })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some("test_token"));

    let err = client
        .request("/runs/run-1", Method::GET, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn test_malformed_json_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runs/run-1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some("test_token"));

    let err = client
        .request("/runs/run-1", Method::GET, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert!(err.to_string().contains("Bad Gateway"));
}

#[tokio::test]
async fn test_fetch_document_accepts_unenveloped_plan() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plans/plan-111/json-output-redacted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "format_version": "1.2",
            "terraform_version": "1.9.5",
            "resource_changes": [{ "change": { "actions": ["create"] } }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some("test_token"));

    let document = client
        .fetch_document("/plans/plan-111/json-output-redacted")
        .await
        .unwrap();

    assert_eq!(document["format_version"], "1.2");
}

#[tokio::test]
async fn test_fetch_document_not_found_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plans/plan-gone/json-output-redacted"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{ "status": "404", "title": "not found" }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Some("test_token"));

    let err = client
        .fetch_document("/plans/plan-gone/json-output-redacted")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn test_slow_response_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/runs/run-slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": {} }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = TfeClient::with_base_url(
        Some("test_token".to_string()),
        mock_server.uri(),
        Duration::from_millis(200),
    )
    .unwrap();

    let err = client
        .request("/runs/run-slow", Method::GET, None)
        .await
        .unwrap_err();

    match err {
        TfeError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("Expected TfeError::Transport, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a listener to get a local port with nothing behind it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let client = TfeClient::with_base_url(
        Some("test_token".to_string()),
        format!("http://127.0.0.1:{}", port),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = client
        .request("/organizations/acme", Method::GET, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}
