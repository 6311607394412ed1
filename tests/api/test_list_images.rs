// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for GET /api/get-images

use ai_gallery::storage::{BlobStore, PutOptions, StorageError};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use bytes::Bytes;
use serde_json::Value;
use std::time::Duration;
use tower::util::ServiceExt;

use crate::common::{test_app, FakeInference, FAKE_JPEG};

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let app = test_app(FakeInference::succeeding());

    let (status, json) = get_json(app.router, "/api/get-images").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, Value::Array(vec![]));
}

#[tokio::test]
async fn test_listing_is_newest_first() {
    let app = test_app(FakeInference::succeeding());
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        app.store
            .put(name, Bytes::from_static(FAKE_JPEG), PutOptions::public_jpeg())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (status, json) = get_json(app.router, "/api/get-images").await;

    assert_eq!(status, StatusCode::OK);
    let pathnames: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["pathname"].as_str().unwrap())
        .collect();
    assert_eq!(pathnames, vec!["c.jpg", "b.jpg", "a.jpg"]);

    let first = &json[0];
    assert!(first["url"].as_str().unwrap().ends_with("/blobs/c.jpg"));
    assert_eq!(first["size"], FAKE_JPEG.len());
    assert!(first["uploadedAt"].is_string());
}

#[tokio::test]
async fn test_generated_image_appears_in_listing() {
    let app = test_app(FakeInference::succeeding());
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate-image")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"text":"a lighthouse"}"#))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Value = serde_json::from_slice(&bytes).unwrap();

    let (_, json) = get_json(app.router, "/api/get-images").await;

    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["url"], created["imageUrl"]);
}

#[tokio::test]
async fn test_listing_failure_is_generic_500() {
    let app = test_app(FakeInference::succeeding());
    app.store
        .inject_error(StorageError::NetworkError("connection reset".to_string()))
        .await;

    let (status, json) = get_json(app.router, "/api/get-images").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Failed to process request");
}
