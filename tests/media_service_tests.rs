// SPDX-License-Identifier: MIT

//! Media upload service tests against a mock storage backend.
//!
//! These tests verify that:
//! 1. Local validation failures never reach the network
//! 2. Batch operations settle every item and partition the outcomes
//! 3. Deletion reverse-parses storage paths from public URLs

use std::io::Write;

use wiremock::matchers::{any, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

/// A temp file with the given suffix and size, kept alive by the guard.
fn temp_image(suffix: &str, size: usize) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(&vec![0u8; size]).expect("failed to write temp file");
    file
}

#[tokio::test]
async fn test_oversize_upload_is_rejected_before_any_network_call() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    // Backend double asserting zero calls
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = temp_image(".jpg", 6 * 1024 * 1024);
    let err = services
        .media
        .upload(file.path().to_str().unwrap(), "user-1", None)
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    assert!(err.to_string().contains("File size too large"));
    server.verify().await;
}

#[tokio::test]
async fn test_upload_returns_public_url() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    Mock::given(method("POST"))
        .and(path_regex(
            r"^/storage/v1/object/climb-images/user-1/profile/\d+_[0-9a-f]{16}\.jpg$",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Key": "climb-images/user-1/profile/x.jpg"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = temp_image(".jpg", 1024);
    let url = services
        .media
        .upload(file.path().to_str().unwrap(), "user-1", None)
        .await
        .expect("upload failed");

    let expected_prefix = format!(
        "{}/storage/v1/object/public/climb-images/user-1/profile/",
        server.uri()
    );
    assert!(url.starts_with(&expected_prefix), "unexpected url: {}", url);
    assert!(url.ends_with(".jpg"));
}

#[tokio::test]
async fn test_upload_scopes_path_to_climb_when_given() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    Mock::given(method("POST"))
        .and(path_regex(
            r"^/storage/v1/object/climb-images/user-1/climb-7/",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let file = temp_image(".jpg", 512);
    services
        .media
        .upload(file.path().to_str().unwrap(), "user-1", Some("climb-7"))
        .await
        .expect("upload failed");

    // Non-overwriting semantics: a path collision must be a hard failure
    let requests = server.received_requests().await.unwrap();
    let upsert = requests[0]
        .headers
        .get("x-upsert")
        .and_then(|v| v.to_str().ok());
    assert_eq!(upsert, Some("false"));
}

#[tokio::test]
async fn test_upload_batch_partitions_successes_and_failures() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/climb-images/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let first = temp_image(".jpg", 256);
    let third = temp_image(".jpg", 256);
    let paths = vec![
        first.path().to_str().unwrap().to_string(),
        "/nonexistent/missing.jpg".to_string(),
        third.path().to_str().unwrap().to_string(),
    ];

    let outcome = services
        .media
        .upload_batch(&paths, "user-1", Some("climb-3"))
        .await;

    assert_eq!(outcome.urls.len(), 2);
    assert_eq!(outcome.errors.len(), 1);
}

#[tokio::test]
async fn test_delete_by_url_without_bucket_segment_issues_no_remove() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = services
        .media
        .delete_by_url("https://cdn.example.com/some-other-bucket/u1/img.jpg")
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    assert!(err.to_string().contains("Invalid image URL"));
    server.verify().await;
}

#[tokio::test]
async fn test_delete_by_url_removes_reverse_parsed_path() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/climb-images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!(
        "{}/storage/v1/object/public/climb-images/user-1/climb-2/17_ab.jpg",
        server.uri()
    );
    services.media.delete_by_url(&url).await.expect("delete failed");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "prefixes": ["user-1/climb-2/17_ab.jpg"] })
    );
}

#[tokio::test]
async fn test_delete_batch_collects_only_errors() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/climb-images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let urls = vec![
        format!(
            "{}/storage/v1/object/public/climb-images/u1/c1/a.jpg",
            server.uri()
        ),
        "https://cdn.example.com/not-our-bucket/u1/b.jpg".to_string(),
    ];

    let errors = services.media.delete_batch(&urls).await;

    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_validation_error());
}

#[tokio::test]
async fn test_validate_accepts_small_png() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    let file = temp_image(".png", 2048);
    let result = services
        .media
        .validate(file.path().to_str().unwrap())
        .await;

    assert!(result.is_valid);
    assert_eq!(result.reason, None);
}

#[tokio::test]
async fn test_validate_rejects_gif_and_missing_file() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    let gif = temp_image(".gif", 128);
    let result = services.media.validate(gif.path().to_str().unwrap()).await;
    assert!(!result.is_valid);
    assert_eq!(result.reason.as_deref(), Some("Invalid file type"));

    let result = services.media.validate("/nonexistent/shot.png").await;
    assert!(!result.is_valid);
    assert_eq!(result.reason.as_deref(), Some("File does not exist"));
}

#[tokio::test]
async fn test_validate_rejects_oversize_file() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    let file = temp_image(".png", 5 * 1024 * 1024 + 1);
    let result = services
        .media
        .validate(file.path().to_str().unwrap())
        .await;

    assert!(!result.is_valid);
    assert_eq!(result.reason.as_deref(), Some("File size too large"));
}

#[tokio::test]
async fn test_transform_urls_are_identity_for_now() {
    let server = MockServer::start().await;
    let services = common::test_services(&server.uri());

    let url = "https://example.supabase.co/storage/v1/object/public/climb-images/u1/a.jpg";
    assert_eq!(services.media.thumbnail_url(url), url);
}
