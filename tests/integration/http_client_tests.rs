//! HTTP completion client tests

use crate::common::fixtures::TEST_API_KEY;
use crate::common::server::{COMPLETION_PATH, completion_body};
use crate::common::credentials_for;
use framedoc::core::types::{ContentPart, system_message, user_message};
use framedoc::{ChatRequest, CompletionEndpoint, HttpCompletionClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> ChatRequest {
    ChatRequest::new(vec![
        system_message("Describe the frames"),
        user_message(vec![
            ContentPart::text("Time: 1s, Image URL: https://blob.example/1.png"),
            ContentPart::image("https://blob.example/1.png"),
        ]),
    ])
    .with_max_tokens(4096)
    .with_temperature(Some(0.0))
}

async fn server_with(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETION_PATH))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_sends_wire_format_and_extracts_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETION_PATH))
        .and(header("api-key", TEST_API_KEY))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "max_tokens": 4096,
            "temperature": 0.0,
            "messages": [
                {"role": "system", "content": "Describe the frames"},
                {"role": "user", "content": [
                    {"type": "text", "text": "Time: 1s, Image URL: https://blob.example/1.png"},
                    {"type": "image_url", "image_url": {"url": "https://blob.example/1.png"}}
                ]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("A wrench")))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpCompletionClient::new().unwrap();
    let credentials = credentials_for(&format!("{}{}", server.uri(), COMPLETION_PATH));

    let text = client.complete(&request(), &credentials).await.unwrap();
    assert_eq!(text, "A wrench");
}

#[tokio::test]
async fn test_omits_temperature_when_unset() {
    let server = server_with(ResponseTemplate::new(200).set_body_json(completion_body("ok"))).await;
    let client = HttpCompletionClient::new().unwrap();
    let credentials = credentials_for(&format!("{}{}", server.uri(), COMPLETION_PATH));

    let request = request().with_temperature(None);
    client.complete(&request, &credentials).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = received[0].body_json().unwrap();
    assert!(body.get("temperature").is_none());
    assert_eq!(body["max_tokens"], 4096);
}

#[tokio::test]
async fn test_error_status_carries_azure_message() {
    let server = server_with(ResponseTemplate::new(401).set_body_json(json!({
        "error": {"code": "401", "message": "Access denied due to invalid subscription key."}
    })))
    .await;
    let client = HttpCompletionClient::new().unwrap();
    let credentials = credentials_for(&format!("{}{}", server.uri(), COMPLETION_PATH));

    let err = client.complete(&request(), &credentials).await.unwrap_err();
    assert_eq!(err.status, Some(401));
    assert!(err.message.contains("Access denied"));
}

#[tokio::test]
async fn test_missing_choices_is_malformed() {
    let server = server_with(
        ResponseTemplate::new(200).set_body_json(json!({"id": "x", "choices": []})),
    )
    .await;
    let client = HttpCompletionClient::new().unwrap();
    let credentials = credentials_for(&format!("{}{}", server.uri(), COMPLETION_PATH));

    let err = client.complete(&request(), &credentials).await.unwrap_err();
    assert_eq!(err.status, None);
    assert!(err.message.starts_with("Malformed response"));
}

#[tokio::test]
async fn test_null_content_is_malformed() {
    let server = server_with(ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
    })))
    .await;
    let client = HttpCompletionClient::new().unwrap();
    let credentials = credentials_for(&format!("{}{}", server.uri(), COMPLETION_PATH));

    let err = client.complete(&request(), &credentials).await.unwrap_err();
    assert!(err.message.starts_with("Malformed response"));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = server_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>")).await;
    let client = HttpCompletionClient::new().unwrap();
    let credentials = credentials_for(&format!("{}{}", server.uri(), COMPLETION_PATH));

    let err = client.complete(&request(), &credentials).await.unwrap_err();
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let server = MockServer::start().await;
    let endpoint = format!("{}{}", server.uri(), COMPLETION_PATH);
    drop(server);

    let client = HttpCompletionClient::new().unwrap();
    let err = client
        .complete(&request(), &credentials_for(&endpoint))
        .await
        .unwrap_err();
    assert_eq!(err.status, None);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn test_request_timeout_is_transport_error() {
    let server = server_with(
        ResponseTemplate::new(200)
            .set_delay(Duration::from_secs(2))
            .set_body_json(completion_body("late")),
    )
    .await;
    let client = HttpCompletionClient::with_timeout(Duration::from_millis(200)).unwrap();
    let credentials = credentials_for(&format!("{}{}", server.uri(), COMPLETION_PATH));

    let err = client.complete(&request(), &credentials).await.unwrap_err();
    assert_eq!(err.status, None);
}
