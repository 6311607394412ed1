// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the page, feed fragment, script, blob and health routes

use ai_gallery::storage::{BlobStore, PutOptions};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
};
use bytes::Bytes;
use tower::util::ServiceExt;

use crate::common::{test_app, FakeInference, FAKE_JPEG};

async fn get(router: axum::Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn content_type(response: &Response) -> String {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn test_index_renders_loading_page() {
    let app = test_app(FakeInference::succeeding());

    let response = get(app.router, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/html"));

    let html = body_text(response).await;
    assert_eq!(html.matches("data-testid=\"skeleton-card\"").count(), 6);
    assert!(html.contains("id=\"prompt-form\""));
    assert!(html.contains("src=\"/assets/gallery.js\""));
}

#[tokio::test]
async fn test_feed_renders_stored_images() {
    let app = test_app(FakeInference::succeeding());
    for name in ["one.jpg", "two.jpg"] {
        app.store
            .put(name, Bytes::from_static(FAKE_JPEG), PutOptions::public_jpeg())
            .await
            .unwrap();
    }

    let response = get(app.router, "/gallery/feed").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.starts_with("<div id=\"feed\""));
    assert_eq!(html.matches("data-testid=\"image-card\"").count(), 2);
    assert_eq!(html.matches("data-testid=\"skeleton-card\"").count(), 0);
    assert!(html.contains("/blobs/one.jpg"));
    assert!(html.contains("/blobs/two.jpg"));
}

#[tokio::test]
async fn test_script_is_served_as_javascript() {
    let app = test_app(FakeInference::succeeding());

    let response = get(app.router, "/assets/gallery.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/javascript");
    assert!(body_text(response).await.contains("/api/generate-image"));
}

#[tokio::test]
async fn test_blob_served_with_content_type() {
    let app = test_app(FakeInference::succeeding());
    app.store
        .put("cat.jpg", Bytes::from_static(FAKE_JPEG), PutOptions::public_jpeg())
        .await
        .unwrap();

    let response = get(app.router, "/blobs/cat.jpg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "image/jpeg");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), FAKE_JPEG);
}

#[tokio::test]
async fn test_missing_blob_is_404() {
    let app = test_app(FakeInference::succeeding());

    let response = get(app.router, "/blobs/missing.jpg").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Not found"));
}

#[tokio::test]
async fn test_health() {
    let app = test_app(FakeInference::succeeding());

    let response = get(app.router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], ai_gallery::version::VERSION_NUMBER);
}
