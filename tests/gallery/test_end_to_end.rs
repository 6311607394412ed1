// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gallery client and CLI against a real server with fake upstreams

use ai_gallery::api::{create_app, AppState};
use ai_gallery::cli::commands::{render, RenderArgs};
use ai_gallery::gallery::GalleryClient;
use ai_gallery::storage::MemoryBlobStore;
use std::sync::Arc;

use crate::common::FakeInference;

/// Serve the app on an ephemeral port; memory blob URLs point back at it
async fn spawn_server() -> (String, Arc<FakeInference>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let inference = Arc::new(FakeInference::succeeding());
    let store = MemoryBlobStore::new(&base);
    let app = create_app(AppState::new(inference.clone(), Arc::new(store)));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base, inference)
}

#[tokio::test]
async fn test_generate_then_list_round_trip() {
    let (base, inference) = spawn_server().await;

    let mut client = GalleryClient::new(&base).unwrap();
    client.mount().await;
    assert!(client.state().images().is_empty());

    let first = client.submit("a lighthouse at dusk").await.unwrap().unwrap();
    let second = client.submit("a lighthouse at dusk").await.unwrap().unwrap();

    assert_ne!(first, second);
    assert_eq!(inference.call_count().await, 2);

    let urls: Vec<&str> = client
        .state()
        .images()
        .iter()
        .map(|image| image.url.as_str())
        .collect();
    assert_eq!(urls.len(), 2);
    assert!(urls.contains(&first.as_str()));
    assert!(urls.contains(&second.as_str()));
}

#[tokio::test]
async fn test_empty_prompt_round_trip_fails_without_upstream_call() {
    let (base, inference) = spawn_server().await;

    let mut client = GalleryClient::new(&base).unwrap();
    client.mount().await;

    assert!(client.submit("").await.unwrap().is_none());
    assert_eq!(inference.call_count().await, 0);
}

#[tokio::test]
async fn test_cli_render_writes_page() {
    let (base, _) = spawn_server().await;

    let mut client = GalleryClient::new(&base).unwrap();
    client.submit("a red fox").await.unwrap().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("gallery.html");
    render(
        &base,
        RenderArgs {
            output: Some(output.clone()),
        },
    )
    .await
    .unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert_eq!(html.matches("data-testid=\"image-card\"").count(), 1);
    assert_eq!(html.matches("data-testid=\"skeleton-card\"").count(), 0);
}
