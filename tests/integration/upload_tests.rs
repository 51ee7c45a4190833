//! Thumbnail upload tests

use framedoc::services::{HttpThumbnailUploader, ThumbnailUploader};
use framedoc::{FrameDocError, KeyFrameSet};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

async fn upload_server(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(query_param("type", "image"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_upload_posts_multipart_file() {
    let server = upload_server(
        ResponseTemplate::new(200).set_body_json(json!({"url": "https://blob.example/images/a.png?sig=x"})),
    )
    .await;
    let uploader = HttpThumbnailUploader::new(&format!("{}/api/upload", server.uri())).unwrap();

    let url = uploader.upload(PNG_DATA_URI).await.unwrap();
    assert_eq!(url, "https://blob.example/images/a.png?sig=x");

    let received = server.received_requests().await.unwrap();
    let content_type = received[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains(r#"name="file""#));
    assert!(body.contains(r#"filename="image_"#));
    assert!(body.contains(".png\""));
}

#[tokio::test]
async fn test_upload_error_status() {
    let server = upload_server(ResponseTemplate::new(500)).await;
    let uploader = HttpThumbnailUploader::new(&format!("{}/api/upload", server.uri())).unwrap();

    let err = uploader.upload(PNG_DATA_URI).await.unwrap_err();
    assert!(matches!(err, FrameDocError::Upload(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_key_frames_upload_pending() {
    let server = upload_server(
        ResponseTemplate::new(200).set_body_json(json!({"url": "https://blob.example/images/up.png"})),
    )
    .await;
    let uploader = HttpThumbnailUploader::new(&format!("{}/api/upload", server.uri())).unwrap();

    let mut frames = KeyFrameSet::new();
    frames.capture(0.5, PNG_DATA_URI);
    frames.capture(1.0, "https://blob.example/images/kept.png");
    frames.capture(1.5, PNG_DATA_URI);

    let uploaded = frames.upload_pending(&uploader).await.unwrap();

    assert_eq!(uploaded, 2);
    let urls: Vec<&str> = frames.frames().iter().map(|f| f.thumbnail_url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://blob.example/images/up.png",
            "https://blob.example/images/kept.png",
            "https://blob.example/images/up.png",
        ]
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
