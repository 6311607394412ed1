// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Browser-facing routes: the page, its feed fragment, its script and stored blobs

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use tracing::debug;

use super::errors::ApiError;
use super::http_server::AppState;
use super::list_images::load_records;
use crate::gallery::{render_feed, render_page, GalleryImage, GalleryState};
use crate::storage::StorageError;

const GALLERY_SCRIPT: &str = include_str!("../../assets/gallery.js");
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// GET / - Page shell with skeleton cards; the script loads the feed
pub async fn index_handler() -> Result<Html<String>, ApiError> {
    Ok(Html(render_page(&GalleryState::new())?))
}

/// GET /gallery/feed - Rendered `#feed` element for the current listing
pub async fn feed_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let images = load_records(&state)
        .await?
        .into_iter()
        .map(|record| GalleryImage::new(record.url))
        .collect();

    Ok(Html(render_feed(&GalleryState::with_images(images))?))
}

/// GET /assets/gallery.js
pub async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        GALLERY_SCRIPT,
    )
}

/// GET /blobs/*pathname - Serve stored bytes with their recorded content type
pub async fn blob_handler(
    State(state): State<AppState>,
    Path(pathname): Path<String>,
) -> Result<Response, ApiError> {
    let blob = state.blob_store.get(&pathname).await.map_err(|e| match e {
        StorageError::NotFound(path) => ApiError::NotFound(path),
        StorageError::InvalidPath(path) => ApiError::NotFound(path),
        other => ApiError::Storage(other),
    })?;

    debug!("Serving blob {} ({} bytes)", pathname, blob.data.len());

    let content_type = blob
        .content_type
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
    Ok(([(header::CONTENT_TYPE, content_type)], blob.data).into_response())
}
