// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gallery listing endpoint handler

use axum::{extract::State, Json};
use tracing::debug;

use super::response::{newest_first, ImageRecord};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// GET /api/get-images - List every stored image, newest first
pub async fn list_images_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ImageRecord>>, ApiError> {
    let records = load_records(&state).await?;
    debug!("Listing {} images", records.len());
    Ok(Json(records))
}

/// Listing shared by the JSON endpoint and the rendered feed
pub async fn load_records(state: &AppState) -> Result<Vec<ImageRecord>, ApiError> {
    let blobs = state.blob_store.list().await?;
    Ok(newest_first(
        blobs.into_iter().map(ImageRecord::from).collect(),
    ))
}
