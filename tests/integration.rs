//! HTTP-level integration tests for the validator façade.
//!
//! These drive the full router with `tower::ServiceExt::oneshot`: a real
//! on-disk image directory and real (tiny) external commands, no network.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use payment_validator_api::api::{create_router, AppState};
use payment_validator_api::processor::{CommandProcessor, MockProcessor, PathProcessor};

fn router_with(processor: Arc<dyn PathProcessor>, image_dir: &std::path::Path) -> axum::Router {
    create_router(AppState::new(processor, image_dir))
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn post_process(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/process_path")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn serves_existing_image_with_content_type() {
    let dir = tempfile::tempdir().unwrap();
    let payload = b"\x89PNG\r\n\x1a\nfake-image-data".to_vec();
    std::fs::write(dir.path().join("report.png"), &payload).unwrap();

    let app = router_with(Arc::new(MockProcessor::new()), dir.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/get_image/report.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    assert_eq!(body_bytes(response).await, payload);
}

#[tokio::test]
async fn serves_nested_image_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("2024")).unwrap();
    std::fs::write(dir.path().join("2024/summary.jpg"), b"jpeg-bytes").unwrap();

    let app = router_with(Arc::new(MockProcessor::new()), dir.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/get_image/2024/summary.jpg")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
}

#[tokio::test]
async fn missing_image_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = router_with(Arc::new(MockProcessor::new()), dir.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/get_image/absent.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn traversal_attempt_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("inside.png"), b"data").unwrap();

    let app = router_with(Arc::new(MockProcessor::new()), dir.path());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/get_image/subdir/../../inside.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn process_path_missing_field_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let app = router_with(Arc::new(MockProcessor::new()), dir.path());

    let response = app.oneshot(post_process("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Falta el parámetro 'path'"})
    );
}

#[tokio::test]
async fn process_path_success_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let processor = MockProcessor::with_result(json!({"status": "ok", "rows": 12}));
    let app = router_with(Arc::new(processor.clone()), dir.path());

    let response = app
        .oneshot(post_process(r#"{"path": "/tmp/x.csv"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "ok", "rows": 12})
    );
    // The path reaches the collaborator unchanged.
    assert_eq!(processor.calls(), vec!["/tmp/x.csv"]);
}

#[tokio::test]
async fn process_path_failure_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let app = router_with(Arc::new(MockProcessor::with_failure("missing")), dir.path());

    let response = app
        .oneshot(post_process(r#"{"path": "/no/such/file"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": "missing"}));
}

#[tokio::test]
async fn process_path_non_string_path_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = router_with(Arc::new(MockProcessor::new()), dir.path());

    let response = app.oneshot(post_process(r#"{"path": 42}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn process_path_unparseable_body_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = router_with(Arc::new(MockProcessor::new()), dir.path());

    let response = app.oneshot(post_process("not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn command_processor_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    // printf repeats its format for the appended path, producing JSON that
    // embeds the requested path.
    let processor = CommandProcessor::new("printf", vec![r#"{"processed":"%s"}"#.to_string()]);
    let app = router_with(Arc::new(processor), dir.path());

    let response = app
        .oneshot(post_process(r#"{"path": "/tmp/batch.csv"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"processed": "/tmp/batch.csv"})
    );
}

#[tokio::test]
async fn command_processor_failure_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let processor = CommandProcessor::new("false", vec![]);
    let app = router_with(Arc::new(processor), dir.path());

    let response = app
        .oneshot(post_process(r#"{"path": "/tmp/batch.csv"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body.get("error").is_some());
}
