// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::gallery_page::{blob_handler, feed_handler, index_handler, script_handler};
use super::generate_image::generate_image_handler;
use super::handlers::health_handler;
use super::list_images::list_images_handler;
use crate::inference::TextToImage;
use crate::storage::BlobStore;

/// Shared handles every route works against
#[derive(Clone)]
pub struct AppState {
    pub inference: Arc<dyn TextToImage>,
    pub blob_store: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(inference: Arc<dyn TextToImage>, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            inference,
            blob_store,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Gallery page
        .route("/", get(index_handler))
        .route("/gallery/feed", get(feed_handler))
        .route("/assets/gallery.js", get(script_handler))
        // Stored images (memory backend URLs point here)
        .route("/blobs/*pathname", get(blob_handler))
        // JSON API
        .route("/health", get(health_handler))
        .route("/api/generate-image", post(generate_image_handler))
        .route("/api/get-images", get(list_images_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Gallery server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gallery server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
