// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the inference client against a fake upstream

use ai_gallery::config::InferenceConfig;
use ai_gallery::inference::{
    warm_once, InferenceClient, InferenceError, TextToImage, WARMUP_PROMPT,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];

fn client_for(server: &MockServer) -> InferenceClient {
    InferenceClient::new(&InferenceConfig {
        generate_url: format!("{}/generate", server.uri()),
        health_url: format!("{}/health", server.uri()),
        api_key: API_KEY.to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_generate_sends_prompt_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/generate"))
        .and(query_param("prompt", "a cat & a dog"))
        .and(header("X-API-Key", API_KEY))
        .and(header("Accept", "image/jpeg"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(JPEG.to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let image = client_for(&server).generate("a cat & a dog").await.unwrap();
    assert_eq!(image.as_ref(), JPEG);
}

#[tokio::test]
async fn test_generate_non_2xx_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthurized"))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("a cat").await.unwrap_err();
    match err {
        InferenceError::Upstream(upstream) => {
            assert_eq!(upstream.status, 401);
            assert_eq!(upstream.body, "Unauthurized");
            assert_eq!(
                upstream.to_string(),
                "HTTP error status: 401 error message: Unauthurized"
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_transport_failure() {
    let client = InferenceClient::new(&InferenceConfig {
        generate_url: "http://127.0.0.1:59997/".to_string(),
        health_url: "http://127.0.0.1:59997/health".to_string(),
        api_key: API_KEY.to_string(),
    })
    .unwrap();

    let err = client.generate("a cat").await.unwrap_err();
    assert!(matches!(err, InferenceError::Transport(_)));
}

#[tokio::test]
async fn test_health_parses_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "timestamp": "2026-10-17T12:00:00+00:00"
        })))
        .mount(&server)
        .await;

    let health = client_for(&server).health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.timestamp, "2026-10-17T12:00:00+00:00");
}

#[tokio::test]
async fn test_warm_once_hits_health_then_generate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "timestamp": "2026-10-17T12:00:00+00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/generate"))
        .and(query_param("prompt", WARMUP_PROMPT))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG.to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let report = warm_once(&client_for(&server)).await;
    assert!(report.is_warm());
    assert_eq!(report.generated_bytes, Some(JPEG.len()));
}
